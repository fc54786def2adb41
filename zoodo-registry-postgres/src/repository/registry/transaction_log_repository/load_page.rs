use crate::utils::TryFromRow;
use sqlx::Row;
use std::error::Error;
use zoodo_registry_db::models::TransactionLogModel;
use zoodo_registry_db::repository::pagination::{Page, PageRequest};

use super::repo_impl::TransactionLogRepositoryImpl;

impl TransactionLogRepositoryImpl {
    /// One page of the log, ordered by sequence.
    pub async fn load_page(
        &self,
        page: PageRequest,
    ) -> Result<Page<TransactionLogModel>, Box<dyn Error + Send + Sync>> {
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

        let (total, rows) = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM transaction_log")
                .fetch_one(&mut **transaction)
                .await?
                .try_get("total")?;
            let rows = sqlx::query(
                r#"SELECT * FROM transaction_log ORDER BY sequence LIMIT $1 OFFSET $2"#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **transaction)
            .await?;
            (total, rows)
        };

        let items = rows
            .iter()
            .map(TransactionLogModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let total = usize::try_from(total)?;
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}
