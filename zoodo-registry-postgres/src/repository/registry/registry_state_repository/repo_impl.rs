use crate::executor::Executor;
use crate::utils::{get_address, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::RegistryStateModel;

pub struct RegistryStateRepositoryImpl {
    pub executor: Executor,
}

impl RegistryStateRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for RegistryStateModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(RegistryStateModel {
            owner: get_address(row, "owner")?,
            paused: row.try_get("paused")?,
            total_medical_records: get_u64(row, "total_medical_records")?,
            total_appointment_records: get_u64(row, "total_appointment_records")?,
            last_sequence: get_u64(row, "last_sequence")?,
            last_timestamp: get_u64(row, "last_timestamp")?,
            deployed_at: get_u64(row, "deployed_at")?,
        })
    }
}
