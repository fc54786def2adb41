use crate::executor::Executor;
use crate::utils::{get_address, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::TransactionLogModel;

pub struct TransactionLogRepositoryImpl {
    pub executor: Executor,
}

impl TransactionLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for TransactionLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(TransactionLogModel {
            id: row.try_get("id")?,
            sequence: get_u64(row, "sequence")?,
            executed_at: get_u64(row, "executed_at")?,
            caller: get_address(row, "caller")?,
            operation: row.try_get("operation")?,
            subject: row.try_get("subject")?,
        })
    }
}
