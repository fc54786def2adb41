use async_trait::async_trait;
use crate::utils::to_i64;
use sqlx::Postgres;
use std::error::Error;
use zoodo_registry_db::models::AppointmentRecordModel;
use zoodo_registry_db::repository::create_batch::CreateBatch;

use super::repo_impl::AppointmentRecordRepositoryImpl;

impl AppointmentRecordRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &AppointmentRecordRepositoryImpl,
        items: Vec<AppointmentRecordModel>,
    ) -> Result<Vec<AppointmentRecordModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO appointment_record (appointment_id, appointment_hash, pet_id, timestamp, submitted_by, transaction_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.appointment_id.as_str())
            .bind(item.appointment_hash.as_bytes().as_slice())
            .bind(item.pet_id.as_str())
            .bind(to_i64(item.timestamp)?)
            .bind(item.submitted_by.as_bytes().as_slice())
            .bind(item.transaction_id)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, AppointmentRecordModel> for AppointmentRecordRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AppointmentRecordModel>,
    ) -> Result<Vec<AppointmentRecordModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
