use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, RecordHash};

/// # Documentation
/// - Anchored appointment, keyed by its business id (`appointment_id`), not by hash.
/// - Same lifecycle as [`super::MedicalRecord`]: written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub appointment_hash: RecordHash,
    pub appointment_id: String,
    pub pet_id: String,
    pub timestamp: u64,
    pub submitted_by: Address,
    pub exists: bool,
}

impl AppointmentRecord {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(i64::try_from(self.timestamp).ok()?, 0)
    }
}
