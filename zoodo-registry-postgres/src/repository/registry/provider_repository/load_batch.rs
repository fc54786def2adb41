use async_trait::async_trait;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use zoodo_registry_api::Address;
use zoodo_registry_db::models::ProviderAuthorizationModel;
use zoodo_registry_db::repository::load_batch::LoadBatch;

use super::repo_impl::ProviderRepositoryImpl;

impl ProviderRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ProviderRepositoryImpl,
        ids: &[Address],
    ) -> Result<Vec<Option<ProviderAuthorizationModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<Vec<u8>> = ids.iter().map(|id| id.as_bytes().to_vec()).collect();
        let query = r#"SELECT * FROM provider_authorization WHERE address = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(keys).fetch_all(&mut **transaction).await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = ProviderAuthorizationModel::try_from_row(&row)?;
            item_map.insert(item.address, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ProviderAuthorizationModel> for ProviderRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Address],
    ) -> Result<Vec<Option<ProviderAuthorizationModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
