use async_trait::async_trait;
use sqlx::{Postgres, Row};
use std::collections::HashSet;
use std::error::Error;
use zoodo_registry_api::RecordHash;
use zoodo_registry_db::models::MedicalRecordModel;
use zoodo_registry_db::repository::exist_by_ids::ExistByIds;

use super::repo_impl::MedicalRecordRepositoryImpl;

impl MedicalRecordRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &MedicalRecordRepositoryImpl,
        ids: &[RecordHash],
    ) -> Result<Vec<(RecordHash, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<Vec<u8>> = ids.iter().map(|id| id.as_bytes().to_vec()).collect();
        let query = r#"SELECT record_hash FROM medical_record WHERE record_hash = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(keys).fetch_all(&mut **transaction).await?
        };

        let mut found = HashSet::new();
        for row in rows {
            let bytes: Vec<u8> = row.try_get("record_hash")?;
            found.insert(RecordHash::from_slice(&bytes)?);
        }

        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres, MedicalRecordModel> for MedicalRecordRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[RecordHash],
    ) -> Result<Vec<(RecordHash, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
