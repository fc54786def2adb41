use serde::{Deserialize, Serialize};

use super::Address;

/// Aggregate view returned by `getContractStats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub total_medical_records: u64,
    pub total_appointment_records: u64,
    pub paused: bool,
    pub owner: Address,
}

impl ContractStats {
    /// The stats as the `(uint256, uint256, bool, address)` tuple of the contract ABI.
    pub fn as_tuple(&self) -> (u64, u64, bool, Address) {
        (
            self.total_medical_records,
            self.total_appointment_records,
            self.paused,
            self.owner,
        )
    }
}
