use async_trait::async_trait;
use crate::utils::TryFromRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use zoodo_registry_db::models::PetRecordIdxModel;
use zoodo_registry_db::repository::find_by_pet_id::FindByPetId;
use zoodo_registry_db::utils::hash_as_i64;

use super::repo_impl::PetRecordIdxRepositoryImpl;

impl PetRecordIdxRepositoryImpl {
    pub(super) async fn find_by_pet_id_impl(
        repo: &PetRecordIdxRepositoryImpl,
        pet_id: &str,
    ) -> Result<Vec<PetRecordIdxModel>, Box<dyn Error + Send + Sync>> {
        let pet_id_hash = hash_as_i64(&pet_id)?;
        let query = r#"
            SELECT * FROM pet_record_idx
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

        rows.iter().map(PetRecordIdxModel::try_from_row).collect()
    }

    /// Position the next index entry of `pet_id` takes.
    pub async fn next_position(&self, pet_id: &str) -> Result<u64, Box<dyn Error + Send + Sync>> {
        let pet_id_hash = hash_as_i64(&pet_id)?;
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let count: i64 = sqlx::query(
            r#"SELECT COUNT(*) AS entries FROM pet_record_idx WHERE pet_id_hash = $1 AND pet_id = $2"#,
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
impl FindByPetId<Postgres, PetRecordIdxModel> for PetRecordIdxRepositoryImpl {
    async fn find_by_pet_id(
        &self,
        pet_id: &str,
    ) -> Result<Vec<PetRecordIdxModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_pet_id_impl(self, pet_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::registry::medical_record_repository::test_utils::test_utils::{
        create_test_medical_record, insert_test_transaction,
    };
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use zoodo_registry_db::models::Indexable;
    use zoodo_registry_db::repository::create_batch::CreateBatch;
    use zoodo_registry_db::repository::find_by_pet_id::FindByPetId;

    #[tokio::test]
    #[serial]
    async fn test_find_by_pet_id_in_position_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;
        let transaction = insert_test_transaction(&repos, 1).await?;

        let mut expected = Vec::new();
        for content in ["Vaccination record 1", "Checkup record 1", "Surgery record 1"] {
            let record = create_test_medical_record("PET-001", content.as_bytes(), transaction.id);
            repos.medical_record_repository.create_batch(vec![record.clone()]).await?;
            let position = repos.pet_record_idx_repository.next_position("PET-001").await?;
            repos.pet_record_idx_repository.create_batch(vec![record.to_index(position)?]).await?;
            expected.push(record.record_hash);
        }

        let entries = repos.pet_record_idx_repository.find_by_pet_id("PET-001").await?;
        let hashes: Vec<_> = entries.iter().map(|entry| entry.record_hash).collect();
        assert_eq!(hashes, expected);
        assert_eq!(entries[2].position, 2);

        assert!(repos.pet_record_idx_repository.find_by_pet_id("PET-404").await?.is_empty());

        executor.rollback().await?;
        Ok(())
    }
}
