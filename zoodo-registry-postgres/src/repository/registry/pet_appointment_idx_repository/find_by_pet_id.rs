use async_trait::async_trait;
use crate::utils::TryFromRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use zoodo_registry_db::models::PetAppointmentIdxModel;
use zoodo_registry_db::repository::find_by_pet_id::FindByPetId;
use zoodo_registry_db::utils::hash_as_i64;

use super::repo_impl::PetAppointmentIdxRepositoryImpl;

impl PetAppointmentIdxRepositoryImpl {
    pub(super) async fn find_by_pet_id_impl(
        repo: &PetAppointmentIdxRepositoryImpl,
        pet_id: &str,
    ) -> Result<Vec<PetAppointmentIdxModel>, Box<dyn Error + Send + Sync>> {
        let pet_id_hash = hash_as_i64(&pet_id)?;
        let query = r#"
            SELECT * FROM pet_appointment_idx
            WHERE pet_id_hash = $1 AND pet_id = $2
            ORDER BY position
        "#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(pet_id_hash)
                .bind(pet_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(PetAppointmentIdxModel::try_from_row).collect()
    }

    /// Position the next index entry of `pet_id` takes.
    pub async fn next_position(&self, pet_id: &str) -> Result<u64, Box<dyn Error + Send + Sync>> {
        let pet_id_hash = hash_as_i64(&pet_id)?;
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let count: i64 = sqlx::query(
            r#"SELECT COUNT(*) AS entries FROM pet_appointment_idx WHERE pet_id_hash = $1 AND pet_id = $2"#,
        )
        .bind(pet_id_hash)
        .bind(pet_id)
        .fetch_one(&mut **transaction)
        .await?
        .try_get("entries")?;
        Ok(u64::try_from(count)?)
    }
}

#[async_trait]
impl FindByPetId<Postgres, PetAppointmentIdxModel> for PetAppointmentIdxRepositoryImpl {
    async fn find_by_pet_id(
        &self,
        pet_id: &str,
    ) -> Result<Vec<PetAppointmentIdxModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_pet_id_impl(self, pet_id).await
    }
}
