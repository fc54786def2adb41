use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_record_hash, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::PetRecordIdxModel;

pub struct PetRecordIdxRepositoryImpl {
    pub executor: Executor,
}

impl PetRecordIdxRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for PetRecordIdxModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PetRecordIdxModel {
            pet_id_hash: row.try_get("pet_id_hash")?,
            pet_id: get_heapless_string(row, "pet_id")?,
            position: get_u64(row, "position")?,
            record_hash: get_record_hash(row, "record_hash")?,
        })
    }
}
