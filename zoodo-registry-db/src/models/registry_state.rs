use serde::{Deserialize, Serialize};
use zoodo_registry_api::{Address, ContractStats};

/// # Documentation
/// - Global state of one registry deployment (exactly one row per store).
/// - Counters and `last_sequence` only move forward, and only inside a committed change set.
/// - `last_timestamp` is the block timestamp of the latest write; block time never goes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStateModel {
    pub owner: Address,
    pub paused: bool,
    pub total_medical_records: u64,
    pub total_appointment_records: u64,
    pub last_sequence: u64,
    pub last_timestamp: u64,
    pub deployed_at: u64,
}

impl RegistryStateModel {
    /// Fresh deployment: active, empty, owned by `owner`.
    pub fn new(owner: Address, deployed_at: u64) -> Self {
        Self {
            owner,
            paused: false,
            total_medical_records: 0,
            total_appointment_records: 0,
            last_sequence: 0,
            last_timestamp: deployed_at,
            deployed_at,
        }
    }

    /// Sequence number and block timestamp of the next transaction, given the clock reading `now`.
    pub fn next_block(&self, now: u64) -> (u64, u64) {
        (self.last_sequence + 1, now.max(self.last_timestamp))
    }

    pub fn to_stats(&self) -> ContractStats {
        ContractStats {
            total_medical_records: self.total_medical_records,
            total_appointment_records: self.total_appointment_records,
            paused: self.paused,
            owner: self.owner,
        }
    }
}
