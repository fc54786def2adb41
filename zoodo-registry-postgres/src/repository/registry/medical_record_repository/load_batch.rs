use async_trait::async_trait;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use tracing::debug;
use zoodo_registry_api::RecordHash;
use zoodo_registry_db::models::MedicalRecordModel;
use zoodo_registry_db::repository::load_batch::LoadBatch;

use super::repo_impl::MedicalRecordRepositoryImpl;

impl MedicalRecordRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &MedicalRecordRepositoryImpl,
        ids: &[RecordHash],
    ) -> Result<Vec<Option<MedicalRecordModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut item_map = HashMap::new();
        for id in ids {
            if let Some(record) = repo.record_cache.get(id).await {
                debug!(record_hash = %id, "medical record cache hit");
                item_map.insert(*id, record);
            }
        }

        let misses: Vec<Vec<u8>> = ids
            .iter()
            .filter(|id| !item_map.contains_key(*id))
            .map(|id| id.as_bytes().to_vec())
            .collect();
        if !misses.is_empty() {
            let query = r#"SELECT * FROM medical_record WHERE record_hash = ANY($1)"#;
            let rows = {
                let mut tx = repo.executor.tx.lock().await;
                let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
                sqlx::query(query).bind(misses).fetch_all(&mut **transaction).await?
            };

            for row in rows {
                let item = MedicalRecordModel::try_from_row(&row)?;
                item_map.insert(item.record_hash, item);
            }
        }

        Ok(ids.iter().map(|id| item_map.get(id).cloned()).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, MedicalRecordModel> for MedicalRecordRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[RecordHash],
    ) -> Result<Vec<Option<MedicalRecordModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
