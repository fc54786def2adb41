use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, RecordHash};

/// # Documentation
/// - Anchored medical record: the content hash plus minimal metadata.
/// - Created once by an authorized provider, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub record_hash: RecordHash,
    pub pet_id: String,
    pub record_type: String,
    /// Block timestamp, seconds since the Unix epoch.
    pub timestamp: u64,
    pub submitted_by: Address,
    pub exists: bool,
}

impl MedicalRecord {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(i64::try_from(self.timestamp).ok()?, 0)
    }

    pub fn summary(&self) -> MedicalRecordSummary {
        MedicalRecordSummary {
            pet_id: self.pet_id.clone(),
            timestamp: self.timestamp,
            exists: self.exists,
        }
    }
}

/// The `(petId, timestamp, exists)` triple returned by `getMedicalRecord`.
///
/// Unknown hashes produce the zero value: empty pet id, timestamp 0, `exists == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecordSummary {
    pub pet_id: String,
    pub timestamp: u64,
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_recorded_at() {
        let record = MedicalRecord {
            record_hash: RecordHash::digest(b"Rabies vaccination - 2024-01-15"),
            pet_id: "PET-001".to_string(),
            record_type: "Vaccination".to_string(),
            timestamp: 1_705_276_800,
            submitted_by: Address::from_bytes([7u8; 20]),
            exists: true,
        };

        let summary = record.summary();
        assert_eq!(summary.pet_id, "PET-001");
        assert_eq!(summary.timestamp, 1_705_276_800);
        assert!(summary.exists);

        let recorded_at = record.recorded_at().unwrap();
        assert_eq!(recorded_at.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_zero_valued_summary() {
        let summary = MedicalRecordSummary::default();
        assert_eq!(summary.pet_id, "");
        assert_eq!(summary.timestamp, 0);
        assert!(!summary.exists);
    }
}
