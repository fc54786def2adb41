use serde::{Deserialize, Serialize};
use zoodo_registry_api::RecordHash;

use crate::models::{Identifiable, IdentifierString, Index};

/// # Documentation
/// - Entry of the pet index: the `position`-th record hash anchored for a pet.
/// - Positions are dense and start at 0; ordering by position is submission order.
/// - `pet_id_hash` is the lookup key; `pet_id` is kept to resolve hash collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecordIdxModel {
    pub pet_id_hash: i64,
    pub pet_id: IdentifierString,
    pub position: u64,
    pub record_hash: RecordHash,
}

impl Identifiable for PetRecordIdxModel {
    type Id = RecordHash;

    fn get_id(&self) -> RecordHash {
        self.record_hash
    }
}

impl Index for PetRecordIdxModel {}
