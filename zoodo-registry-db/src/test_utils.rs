use std::sync::Arc;
use uuid::Uuid;
use zoodo_registry_api::{
    Address, CallContext, MedicalRecordRegistry, RecordHash, RegistryOperation,
};

use crate::memory_store::InMemoryRegistryStore;
use crate::models::{MedicalRecordModel, TransactionLogModel};
use crate::service::{ManualClock, RegistryService};

/// 2024-01-01T00:00:00Z
pub const GENESIS_TIME: u64 = 1_704_067_200;

pub fn random_address() -> Address {
    Address::from_bytes(rand::random::<[u8; 20]>())
}

pub fn create_test_medical_record(pet_id: &str, content: &[u8]) -> MedicalRecordModel {
    MedicalRecordModel {
        record_hash: RecordHash::digest(content),
        pet_id: pet_id.try_into().unwrap(),
        record_type: "Checkup".try_into().unwrap(),
        timestamp: GENESIS_TIME,
        submitted_by: random_address(),
        transaction_id: Uuid::new_v4(),
    }
}

pub fn create_test_transaction(sequence: u64, operation: RegistryOperation) -> TransactionLogModel {
    TransactionLogModel {
        id: Uuid::new_v4(),
        sequence,
        executed_at: GENESIS_TIME + sequence,
        caller: random_address(),
        operation,
        subject: String::new(),
    }
}

/// A freshly deployed in-memory registry with a controllable clock.
pub struct TestRegistry {
    pub service: RegistryService<InMemoryRegistryStore>,
    pub clock: Arc<ManualClock>,
    pub owner: Address,
}

impl TestRegistry {
    pub async fn deploy() -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS_TIME));
        let owner = random_address();
        let service = RegistryService::deploy(
            Arc::new(InMemoryRegistryStore::new()),
            clock.clone(),
            owner,
        )
        .await
        .unwrap();
        Self {
            service,
            clock,
            owner,
        }
    }

    pub fn owner_ctx(&self) -> CallContext {
        CallContext::new(self.owner)
    }

    /// Authorize a new random provider and return its call context.
    pub async fn authorized_provider(&self) -> CallContext {
        let provider = random_address();
        self.service
            .authorize_provider(&self.owner_ctx(), provider)
            .await
            .unwrap();
        CallContext::new(provider)
    }
}
