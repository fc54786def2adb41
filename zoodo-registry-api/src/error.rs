use thiserror::Error;

use crate::domain::RecordHash;

/// Errors surfaced by the registry.
///
/// Messages of the access-control variants match the revert strings of the
/// deployed contract, so callers matching on reason strings keep working.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Ownable: caller is not the owner")]
    NotOwner,

    #[error("Ownable: new owner is the zero address")]
    InvalidOwner,

    #[error("Not authorized provider")]
    NotAuthorizedProvider,

    #[error("Pausable: paused")]
    ContractPaused,

    #[error("Pausable: not paused")]
    NotPaused,

    #[error("Record already exists: {0}")]
    DuplicateRecord(RecordHash),

    #[error("Appointment already exists: {0}")]
    DuplicateAppointment(String),

    #[error("Registry has not been deployed")]
    NotDeployed,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl RegistryError {
    /// Human-readable reason string, as shown to the submitting application.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Whether the error was raised by the access-control layer.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            RegistryError::NotOwner | RegistryError::NotAuthorizedProvider
        )
    }
}

impl From<validator::ValidationErrors> for RegistryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RegistryError::ValidationError(errors.to_string())
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
