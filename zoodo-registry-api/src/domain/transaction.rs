use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RegistryError;

use super::Address;

/// Identity of the account submitting a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
}

impl CallContext {
    pub fn new(caller: Address) -> Self {
        Self { caller }
    }
}

impl From<Address> for CallContext {
    fn from(caller: Address) -> Self {
        Self { caller }
    }
}

/// Write operations recorded in the transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "registry_operation", rename_all = "PascalCase"))]
pub enum RegistryOperation {
    AuthorizeProvider,
    RevokeProvider,
    Pause,
    Unpause,
    TransferOwnership,
    StoreMedicalRecord,
    StoreAppointmentRecord,
}

impl RegistryOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryOperation::AuthorizeProvider => "AuthorizeProvider",
            RegistryOperation::RevokeProvider => "RevokeProvider",
            RegistryOperation::Pause => "Pause",
            RegistryOperation::Unpause => "Unpause",
            RegistryOperation::TransferOwnership => "TransferOwnership",
            RegistryOperation::StoreMedicalRecord => "StoreMedicalRecord",
            RegistryOperation::StoreAppointmentRecord => "StoreAppointmentRecord",
        }
    }
}

impl fmt::Display for RegistryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryOperation {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AuthorizeProvider" => Ok(RegistryOperation::AuthorizeProvider),
            "RevokeProvider" => Ok(RegistryOperation::RevokeProvider),
            "Pause" => Ok(RegistryOperation::Pause),
            "Unpause" => Ok(RegistryOperation::Unpause),
            "TransferOwnership" => Ok(RegistryOperation::TransferOwnership),
            "StoreMedicalRecord" => Ok(RegistryOperation::StoreMedicalRecord),
            "StoreAppointmentRecord" => Ok(RegistryOperation::StoreAppointmentRecord),
            _ => Err(RegistryError::ValidationError(format!(
                "unknown registry operation: {s}"
            ))),
        }
    }
}

/// Receipt of a committed write.
///
/// `sequence` is the inclusion order of the write; it starts at 1 and grows by
/// exactly one per committed transaction. `timestamp` is the block timestamp
/// and never decreases, but two receipts may share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub tx_id: Uuid,
    pub sequence: u64,
    pub timestamp: u64,
    pub caller: Address,
    pub operation: RegistryOperation,
    /// The address, record hash or appointment id the write acted on.
    pub subject: String,
}
