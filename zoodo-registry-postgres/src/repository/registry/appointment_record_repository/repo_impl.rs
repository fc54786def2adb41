use crate::executor::Executor;
use crate::utils::{get_address, get_heapless_string, get_record_hash, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::AppointmentRecordModel;

pub struct AppointmentRecordRepositoryImpl {
    pub executor: Executor,
}

impl AppointmentRecordRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for AppointmentRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AppointmentRecordModel {
            appointment_id: get_heapless_string(row, "appointment_id")?,
            appointment_hash: get_record_hash(row, "appointment_hash")?,
            pet_id: get_heapless_string(row, "pet_id")?,
            timestamp: get_u64(row, "timestamp")?,
            submitted_by: get_address(row, "submitted_by")?,
            transaction_id: row.try_get("transaction_id")?,
        })
    }
}
