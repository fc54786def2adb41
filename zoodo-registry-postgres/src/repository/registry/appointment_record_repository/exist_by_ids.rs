use async_trait::async_trait;
use sqlx::{Postgres, Row};
use std::collections::HashSet;
use std::error::Error;
use zoodo_registry_db::models::{AppointmentRecordModel, IdentifierString};
use zoodo_registry_db::repository::exist_by_ids::ExistByIds;

use super::repo_impl::AppointmentRecordRepositoryImpl;

impl AppointmentRecordRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &AppointmentRecordRepositoryImpl,
        ids: &[IdentifierString],
    ) -> Result<Vec<(IdentifierString, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        let query = r#"SELECT appointment_id FROM appointment_record WHERE appointment_id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(keys).fetch_all(&mut **transaction).await?
        };

        let mut found = HashSet::new();
        for row in rows {
            let id: String = row.try_get("appointment_id")?;
            found.insert(id);
        }

        Ok(ids
            .iter()
            .map(|id| (id.clone(), found.contains(id.as_str())))
            .collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres, AppointmentRecordModel> for AppointmentRecordRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[IdentifierString],
    ) -> Result<Vec<(IdentifierString, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
