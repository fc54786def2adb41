use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_u64, TryFromRow};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_db::models::PetAppointmentIdxModel;

pub struct PetAppointmentIdxRepositoryImpl {
    pub executor: Executor,
}

impl PetAppointmentIdxRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for PetAppointmentIdxModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PetAppointmentIdxModel {
            pet_id_hash: row.try_get("pet_id_hash")?,
            pet_id: get_heapless_string(row, "pet_id")?,
            position: get_u64(row, "position")?,
            appointment_id: get_heapless_string(row, "appointment_id")?,
        })
    }
}
