use crate::utils::to_i64;
use std::error::Error;
use zoodo_registry_db::models::ProviderAuthorizationModel;

use super::repo_impl::ProviderRepositoryImpl;

impl ProviderRepositoryImpl {
    /// Insert or overwrite the authorization flag of each provider.
    pub async fn upsert_batch(
        &self,
        items: Vec<ProviderAuthorizationModel>,
    ) -> Result<Vec<ProviderAuthorizationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO provider_authorization (address, is_authorized, updated_at, updated_by, transaction_id)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (address) DO UPDATE
                SET is_authorized = EXCLUDED.is_authorized,
                    updated_at = EXCLUDED.updated_at,
                    updated_by = EXCLUDED.updated_by,
                    transaction_id = EXCLUDED.transaction_id
                "#,
            )
            .bind(item.address.as_bytes().as_slice())
            .bind(item.is_authorized)
            .bind(to_i64(item.updated_at)?)
            .bind(item.updated_by.as_bytes().as_slice())
            .bind(item.transaction_id)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
