use serde::{Deserialize, Serialize};
use std::error::Error;
use uuid::Uuid;
use zoodo_registry_api::{Address, MedicalRecord, RecordHash, StoreMedicalRecordRequest};

use crate::models::{
    Identifiable, IdentifierString, Indexable, PetRecordIdxModel, RecordTypeString,
};
use crate::utils::{bounded_string, hash_as_i64};

/// # Documentation
/// - Stored medical record, keyed by its content hash.
/// - Insert-only: the registry exposes no update or delete path.
/// - `transaction_id` references the transaction log entry that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecordModel {
    pub record_hash: RecordHash,
    pub pet_id: IdentifierString,
    pub record_type: RecordTypeString,
    pub timestamp: u64,
    pub submitted_by: Address,
    pub transaction_id: Uuid,
}

impl MedicalRecordModel {
    pub fn from_request(
        request: &StoreMedicalRecordRequest,
        submitted_by: Address,
        timestamp: u64,
        transaction_id: Uuid,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Self {
            record_hash: request.record_hash,
            pet_id: bounded_string(&request.pet_id, "pet_id")?,
            record_type: bounded_string(&request.record_type, "record_type")?,
            timestamp,
            submitted_by,
            transaction_id,
        })
    }
}

impl Identifiable for MedicalRecordModel {
    type Id = RecordHash;

    fn get_id(&self) -> RecordHash {
        self.record_hash
    }
}

impl Indexable for MedicalRecordModel {
    type IndexType = PetRecordIdxModel;

    fn to_index(&self, position: u64) -> Result<Self::IndexType, Box<dyn Error + Send + Sync>> {
        Ok(PetRecordIdxModel {
            pet_id_hash: hash_as_i64(&self.pet_id.as_str())?,
            pet_id: self.pet_id.clone(),
            position,
            record_hash: self.record_hash,
        })
    }
}

impl From<&MedicalRecordModel> for MedicalRecord {
    fn from(model: &MedicalRecordModel) -> Self {
        MedicalRecord {
            record_hash: model.record_hash,
            pet_id: model.pet_id.to_string(),
            record_type: model.record_type.to_string(),
            timestamp: model.timestamp,
            submitted_by: model.submitted_by,
            exists: true,
        }
    }
}
