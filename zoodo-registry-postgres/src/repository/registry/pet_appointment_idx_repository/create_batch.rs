use async_trait::async_trait;
use crate::utils::to_i64;
use sqlx::Postgres;
use std::error::Error;
use zoodo_registry_db::models::PetAppointmentIdxModel;
use zoodo_registry_db::repository::create_batch::CreateBatch;

use super::repo_impl::PetAppointmentIdxRepositoryImpl;

impl PetAppointmentIdxRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &PetAppointmentIdxRepositoryImpl,
        items: Vec<PetAppointmentIdxModel>,
    ) -> Result<Vec<PetAppointmentIdxModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO pet_appointment_idx (appointment_id, pet_id_hash, pet_id, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.appointment_id.as_str())
            .bind(item.pet_id_hash)
            .bind(item.pet_id.as_str())
            .bind(to_i64(item.position)?)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, PetAppointmentIdxModel> for PetAppointmentIdxRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<PetAppointmentIdxModel>,
    ) -> Result<Vec<PetAppointmentIdxModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
