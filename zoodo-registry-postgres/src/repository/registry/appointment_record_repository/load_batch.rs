use async_trait::async_trait;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use zoodo_registry_db::models::{AppointmentRecordModel, IdentifierString};
use zoodo_registry_db::repository::load_batch::LoadBatch;

use super::repo_impl::AppointmentRecordRepositoryImpl;

impl AppointmentRecordRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &AppointmentRecordRepositoryImpl,
        ids: &[IdentifierString],
    ) -> Result<Vec<Option<AppointmentRecordModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        let query = r#"SELECT * FROM appointment_record WHERE appointment_id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(keys).fetch_all(&mut **transaction).await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = AppointmentRecordModel::try_from_row(&row)?;
            item_map.insert(item.appointment_id.clone(), item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, AppointmentRecordModel> for AppointmentRecordRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[IdentifierString],
    ) -> Result<Vec<Option<AppointmentRecordModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
