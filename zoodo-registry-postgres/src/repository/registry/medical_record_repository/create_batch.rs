use async_trait::async_trait;
use crate::utils::to_i64;
use sqlx::Postgres;
use std::error::Error;
use zoodo_registry_db::models::MedicalRecordModel;
use zoodo_registry_db::repository::create_batch::CreateBatch;

use super::repo_impl::MedicalRecordRepositoryImpl;

impl MedicalRecordRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &MedicalRecordRepositoryImpl,
        items: Vec<MedicalRecordModel>,
    ) -> Result<Vec<MedicalRecordModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            for item in &items {
                sqlx::query(
                    r#"
                    INSERT INTO medical_record (record_hash, pet_id, record_type, timestamp, submitted_by, transaction_id)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(item.record_hash.as_bytes().as_slice())
                .bind(item.pet_id.as_str())
                .bind(item.record_type.as_str())
                .bind(to_i64(item.timestamp)?)
                .bind(item.submitted_by.as_bytes().as_slice())
                .bind(item.transaction_id)
                .execute(&mut **transaction)
                .await?;
            }
        } // Transaction lock released here

        repo.pending.lock().extend(items.iter().cloned());
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, MedicalRecordModel> for MedicalRecordRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<MedicalRecordModel>,
    ) -> Result<Vec<MedicalRecordModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use zoodo_registry_db::repository::create_batch::CreateBatch;
    use zoodo_registry_db::repository::load_batch::LoadBatch;
    use super::super::test_utils::test_utils::{create_test_medical_record, insert_test_transaction};

    #[tokio::test]
    #[serial]
    async fn test_create_batch_reaches_cache_only_after_commit() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;
        let repo = &repos.medical_record_repository;

        let transaction = insert_test_transaction(&repos, 1).await?;
        let record = create_test_medical_record("PET-001", b"Vaccination record 1", transaction.id);
        let saved = repo.create_batch(vec![record.clone()]).await?;
        assert_eq!(saved.len(), 1);

        assert!(repo.record_cache.get(&record.record_hash).await.is_none());
        executor.commit().await?;
        assert_eq!(repo.record_cache.get(&record.record_hash).await, Some(record.clone()));

        let (executor, repos) = ctx.session().await?;
        let loaded = repos.medical_record_repository.load_batch(&[record.record_hash]).await?;
        assert_eq!(loaded, vec![Some(record)]);
        executor.rollback().await?;

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_rolled_back_records_never_cached() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;

        let transaction = insert_test_transaction(&repos, 1).await?;
        let record = create_test_medical_record("PET-001", b"Rolled back", transaction.id);
        repos.medical_record_repository.create_batch(vec![record.clone()]).await?;
        executor.rollback().await?;

        assert!(repos.medical_record_repository.record_cache.get(&record.record_hash).await.is_none());
        Ok(())
    }
}
