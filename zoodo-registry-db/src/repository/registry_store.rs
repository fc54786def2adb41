use async_trait::async_trait;
use zoodo_registry_api::{Address, RecordHash};

use crate::models::{
    AppointmentRecordModel, MedicalRecordModel, PetAppointmentIdxModel, PetRecordIdxModel,
    ProviderAuthorizationModel, RegistryStateModel, TransactionLogModel,
};
use crate::repository::pagination::{Page, PageRequest};

pub type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Everything one registry transaction writes.
///
/// A change set is applied all-or-nothing by [`RegistryStore::commit`]. It always
/// carries the transaction log entry and the registry state after the
/// transaction; at most one of the optional parts is set per operation.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    pub transaction: TransactionLogModel,
    pub state: RegistryStateModel,
    pub provider: Option<ProviderAuthorizationModel>,
    pub medical_record: Option<MedicalRecordModel>,
    pub appointment_record: Option<AppointmentRecordModel>,
}

impl ChangeSet {
    pub fn new(transaction: TransactionLogModel, state: RegistryStateModel) -> Self {
        Self {
            transaction,
            state,
            provider: None,
            medical_record: None,
            appointment_record: None,
        }
    }

    /// Sequence the store must currently be at for this change set to apply.
    pub fn expected_sequence(&self) -> u64 {
        self.transaction.sequence.saturating_sub(1)
    }
}

/// Storage backend of one registry deployment.
///
/// Implementations must make [`RegistryStore::commit`] atomic: either every part
/// of the change set becomes visible, or none does. Commit must also refuse a
/// change set whose sequence does not directly follow the stored one, and a
/// record or appointment whose key already exists.
///
/// Lookups of unknown keys return `Ok(None)` or an empty vector.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Store `state` unless a deployment already exists; return the stored state either way.
    async fn initialize(&self, state: RegistryStateModel) -> StoreResult<RegistryStateModel>;

    async fn load_state(&self) -> StoreResult<Option<RegistryStateModel>>;

    async fn find_provider(
        &self,
        address: &Address,
    ) -> StoreResult<Option<ProviderAuthorizationModel>>;

    async fn find_medical_record(
        &self,
        record_hash: &RecordHash,
    ) -> StoreResult<Option<MedicalRecordModel>>;

    /// Index entries of `pet_id`, ordered by position.
    async fn find_pet_records(&self, pet_id: &str) -> StoreResult<Vec<PetRecordIdxModel>>;

    async fn find_appointment_record(
        &self,
        appointment_id: &str,
    ) -> StoreResult<Option<AppointmentRecordModel>>;

    async fn find_pet_appointments(&self, pet_id: &str)
        -> StoreResult<Vec<PetAppointmentIdxModel>>;

    /// Transaction log ordered by sequence.
    async fn load_transactions(&self, page: PageRequest) -> StoreResult<Page<TransactionLogModel>>;

    async fn commit(&self, change_set: ChangeSet) -> StoreResult<()>;
}
