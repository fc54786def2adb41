use crate::executor::Executor;
use crate::utils::{get_address, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::ProviderAuthorizationModel;

pub struct ProviderRepositoryImpl {
    pub executor: Executor,
}

impl ProviderRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ProviderAuthorizationModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ProviderAuthorizationModel {
            address: get_address(row, "address")?,
            is_authorized: row.try_get("is_authorized")?,
            updated_at: get_u64(row, "updated_at")?,
            updated_by: get_address(row, "updated_by")?,
            transaction_id: row.try_get("transaction_id")?,
        })
    }
}
