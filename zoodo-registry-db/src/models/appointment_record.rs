use serde::{Deserialize, Serialize};
use std::error::Error;
use uuid::Uuid;
use zoodo_registry_api::{Address, AppointmentRecord, RecordHash, StoreAppointmentRecordRequest};

use crate::models::{Identifiable, IdentifierString, Indexable, PetAppointmentIdxModel};
use crate::utils::{bounded_string, hash_as_i64};

/// # Documentation
/// - Stored appointment, keyed by the business `appointment_id`.
/// - `appointment_hash` is the content digest and is not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecordModel {
    pub appointment_id: IdentifierString,
    pub appointment_hash: RecordHash,
    pub pet_id: IdentifierString,
    pub timestamp: u64,
    pub submitted_by: Address,
    pub transaction_id: Uuid,
}

impl AppointmentRecordModel {
    pub fn from_request(
        request: &StoreAppointmentRecordRequest,
        submitted_by: Address,
        timestamp: u64,
        transaction_id: Uuid,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Self {
            appointment_id: bounded_string(&request.appointment_id, "appointment_id")?,
            appointment_hash: request.appointment_hash,
            pet_id: bounded_string(&request.pet_id, "pet_id")?,
            timestamp,
            submitted_by,
            transaction_id,
        })
    }
}

impl Identifiable for AppointmentRecordModel {
    type Id = IdentifierString;

    fn get_id(&self) -> IdentifierString {
        self.appointment_id.clone()
    }
}

impl Indexable for AppointmentRecordModel {
    type IndexType = PetAppointmentIdxModel;

    fn to_index(&self, position: u64) -> Result<Self::IndexType, Box<dyn Error + Send + Sync>> {
        Ok(PetAppointmentIdxModel {
            pet_id_hash: hash_as_i64(&self.pet_id.as_str())?,
            pet_id: self.pet_id.clone(),
            position,
            appointment_id: self.appointment_id.clone(),
        })
    }
}

impl From<&AppointmentRecordModel> for AppointmentRecord {
    fn from(model: &AppointmentRecordModel) -> Self {
        AppointmentRecord {
            appointment_hash: model.appointment_hash,
            appointment_id: model.appointment_id.to_string(),
            pet_id: model.pet_id.to_string(),
            timestamp: model.timestamp,
            submitted_by: model.submitted_by,
            exists: true,
        }
    }
}
