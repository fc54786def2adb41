use serde::{Deserialize, Serialize};

use crate::models::{Identifiable, IdentifierString, Index};

/// Entry of the per-pet appointment index; same layout rules as the pet record index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetAppointmentIdxModel {
    pub pet_id_hash: i64,
    pub pet_id: IdentifierString,
    pub position: u64,
    pub appointment_id: IdentifierString,
}

impl Identifiable for PetAppointmentIdxModel {
    type Id = IdentifierString;

    fn get_id(&self) -> IdentifierString {
        self.appointment_id.clone()
    }
}

impl Index for PetAppointmentIdxModel {}
