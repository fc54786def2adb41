use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zoodo_registry_api::{Address, RegistryOperation, TransactionReceipt};

use crate::models::Identifiable;

/// # Documentation
/// - One entry per committed write; the registry's equivalent of a mined transaction.
/// - Created by the service inside the same change set as the state it describes.
/// - `sequence` is unique and gap-free; it defines inclusion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLogModel {
    pub id: Uuid,
    pub sequence: u64,
    pub executed_at: u64,
    pub caller: Address,
    pub operation: RegistryOperation,
    pub subject: String,
}

impl TransactionLogModel {
    pub fn to_receipt(&self) -> TransactionReceipt {
        TransactionReceipt {
            tx_id: self.id,
            sequence: self.sequence,
            timestamp: self.executed_at,
            caller: self.caller,
            operation: self.operation,
            subject: self.subject.clone(),
        }
    }
}

impl Identifiable for TransactionLogModel {
    type Id = Uuid;

    fn get_id(&self) -> Uuid {
        self.id
    }
}
