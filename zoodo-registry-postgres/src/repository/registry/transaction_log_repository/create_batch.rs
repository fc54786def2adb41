use async_trait::async_trait;
use crate::utils::to_i64;
use sqlx::Postgres;
use std::error::Error;
use zoodo_registry_db::models::TransactionLogModel;
use zoodo_registry_db::repository::create_batch::CreateBatch;

use super::repo_impl::TransactionLogRepositoryImpl;

impl TransactionLogRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &TransactionLogRepositoryImpl,
        items: Vec<TransactionLogModel>,
    ) -> Result<Vec<TransactionLogModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO transaction_log (id, sequence, executed_at, caller, operation, subject)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(to_i64(item.sequence)?)
            .bind(to_i64(item.executed_at)?)
            .bind(item.caller.as_bytes().as_slice())
            .bind(item.operation)
            .bind(item.subject.as_str())
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, TransactionLogModel> for TransactionLogRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TransactionLogModel>,
    ) -> Result<Vec<TransactionLogModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
