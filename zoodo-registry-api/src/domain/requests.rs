use validator::Validate;

use crate::error::RegistryResult;

use super::RecordHash;

/// Longest accepted pet or appointment identifier, in characters. Empty is allowed.
pub const MAX_IDENTIFIER_CHARS: usize = 256;
/// Longest accepted record type label, in characters. Empty is allowed.
pub const MAX_RECORD_TYPE_CHARS: usize = 256;

// `validator` length bounds are `u64`; mirrors of the limits above.
const MAX_IDENTIFIER_CHARS_U64: u64 = MAX_IDENTIFIER_CHARS as u64;
const MAX_RECORD_TYPE_CHARS_U64: u64 = MAX_RECORD_TYPE_CHARS as u64;

/// Arguments of `storeMedicalRecord`, validated before any state is read.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct StoreMedicalRecordRequest {
    pub record_hash: RecordHash,

    #[validate(length(max = MAX_IDENTIFIER_CHARS_U64))]
    pub pet_id: String,

    #[validate(length(max = MAX_RECORD_TYPE_CHARS_U64))]
    pub record_type: String,
}

impl StoreMedicalRecordRequest {
    pub fn new(
        record_hash: RecordHash,
        pet_id: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            record_hash,
            pet_id: pet_id.into(),
            record_type: record_type.into(),
        }
    }

    pub fn validated(self) -> RegistryResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// Arguments of `storeAppointmentRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct StoreAppointmentRecordRequest {
    pub appointment_hash: RecordHash,

    #[validate(length(max = MAX_IDENTIFIER_CHARS_U64))]
    pub appointment_id: String,

    #[validate(length(max = MAX_IDENTIFIER_CHARS_U64))]
    pub pet_id: String,
}

impl StoreAppointmentRecordRequest {
    pub fn new(
        appointment_hash: RecordHash,
        appointment_id: impl Into<String>,
        pet_id: impl Into<String>,
    ) -> Self {
        Self {
            appointment_hash,
            appointment_id: appointment_id.into(),
            pet_id: pet_id.into(),
        }
    }

    pub fn validated(self) -> RegistryResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn test_valid_medical_record_request() {
        let request = StoreMedicalRecordRequest::new(
            RecordHash::digest(b"Vaccination record 1"),
            "PET-001",
            "Vaccination",
        );
        assert!(request.validated().is_ok());
    }

    #[test]
    fn test_empty_identifiers_accepted() {
        let request = StoreMedicalRecordRequest::new(RecordHash::default(), "", "");
        assert!(request.validated().is_ok());

        let request = StoreAppointmentRecordRequest::new(RecordHash::default(), "", "");
        assert!(request.validated().is_ok());
    }

    #[test]
    fn test_descriptive_record_type_accepted() {
        let request = StoreMedicalRecordRequest::new(
            RecordHash::digest(b"Rabies booster"),
            "PET-001",
            "Vaccination - Rabies booster (3-year), lot RB-2024-0115",
        );
        assert!(request.validated().is_ok());
    }

    #[test]
    fn test_overlong_record_type_rejected() {
        let request = StoreMedicalRecordRequest::new(
            RecordHash::default(),
            "PET-001",
            "x".repeat(MAX_RECORD_TYPE_CHARS + 1),
        );
        assert!(matches!(
            request.validated(),
            Err(RegistryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_identifier_limit_counts_characters() {
        let request = StoreAppointmentRecordRequest::new(
            RecordHash::default(),
            "é".repeat(MAX_IDENTIFIER_CHARS),
            "PET-001",
        );
        assert!(request.validated().is_ok());

        let request = StoreAppointmentRecordRequest::new(
            RecordHash::default(),
            "APT-001",
            "9".repeat(MAX_IDENTIFIER_CHARS + 1),
        );
        assert!(request.validated().is_err());
    }
}
