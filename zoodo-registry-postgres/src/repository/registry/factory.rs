use moka::future::Cache;
use std::sync::Arc;
use zoodo_registry_api::RecordHash;
use zoodo_registry_db::models::MedicalRecordModel;

use crate::executor::Executor;

use super::{
    AppointmentRecordRepositoryImpl, MedicalRecordRepositoryImpl, PetAppointmentIdxRepositoryImpl,
    PetRecordIdxRepositoryImpl, ProviderRepositoryImpl, RegistryStateRepositoryImpl,
    TransactionLogRepositoryImpl,
};

/// Factory for creating registry repositories
///
/// This factory holds the caches shared by all units of work and provides
/// methods to build repositories on a given executor.
/// This should be used as a singleton throughout the application.
pub struct RegistryRepoFactory {
    medical_record_cache: Cache<RecordHash, MedicalRecordModel>,
}

impl RegistryRepoFactory {
    pub fn new(record_cache_capacity: u64) -> Arc<Self> {
        Arc::new(Self {
            medical_record_cache: Cache::new(record_cache_capacity),
        })
    }

    pub fn medical_record_cache(&self) -> &Cache<RecordHash, MedicalRecordModel> {
        &self.medical_record_cache
    }

    pub fn build_registry_state_repo(&self, executor: &Executor) -> Arc<RegistryStateRepositoryImpl> {
        Arc::new(RegistryStateRepositoryImpl::new(executor.clone()))
    }

    pub fn build_provider_repo(&self, executor: &Executor) -> Arc<ProviderRepositoryImpl> {
        Arc::new(ProviderRepositoryImpl::new(executor.clone()))
    }

    /// Build a MedicalRecordRepository and register it with the executor, so its
    /// cache follows the outcome of the transaction
    pub fn build_medical_record_repo(&self, executor: &Executor) -> Arc<MedicalRecordRepositoryImpl> {
        let repo = Arc::new(MedicalRecordRepositoryImpl::new(
            executor.clone(),
            self.medical_record_cache.clone(),
        ));
        executor.register_transaction_aware(repo.clone());
        repo
    }

    pub fn build_pet_record_idx_repo(&self, executor: &Executor) -> Arc<PetRecordIdxRepositoryImpl> {
        Arc::new(PetRecordIdxRepositoryImpl::new(executor.clone()))
    }

    pub fn build_appointment_record_repo(
        &self,
        executor: &Executor,
    ) -> Arc<AppointmentRecordRepositoryImpl> {
        Arc::new(AppointmentRecordRepositoryImpl::new(executor.clone()))
    }

    pub fn build_pet_appointment_idx_repo(
        &self,
        executor: &Executor,
    ) -> Arc<PetAppointmentIdxRepositoryImpl> {
        Arc::new(PetAppointmentIdxRepositoryImpl::new(executor.clone()))
    }

    pub fn build_transaction_log_repo(&self, executor: &Executor) -> Arc<TransactionLogRepositoryImpl> {
        Arc::new(TransactionLogRepositoryImpl::new(executor.clone()))
    }

    /// Build all registry repositories on the given executor
    pub fn build_all_repos(&self, executor: &Executor) -> RegistryRepositories {
        RegistryRepositories {
            registry_state_repository: self.build_registry_state_repo(executor),
            provider_repository: self.build_provider_repo(executor),
            medical_record_repository: self.build_medical_record_repo(executor),
            pet_record_idx_repository: self.build_pet_record_idx_repo(executor),
            appointment_record_repository: self.build_appointment_record_repo(executor),
            pet_appointment_idx_repository: self.build_pet_appointment_idx_repo(executor),
            transaction_log_repository: self.build_transaction_log_repo(executor),
        }
    }
}

/// Container for all registry repositories of one unit of work
pub struct RegistryRepositories {
    pub registry_state_repository: Arc<RegistryStateRepositoryImpl>,
    pub provider_repository: Arc<ProviderRepositoryImpl>,
    pub medical_record_repository: Arc<MedicalRecordRepositoryImpl>,
    pub pet_record_idx_repository: Arc<PetRecordIdxRepositoryImpl>,
    pub appointment_record_repository: Arc<AppointmentRecordRepositoryImpl>,
    pub pet_appointment_idx_repository: Arc<PetAppointmentIdxRepositoryImpl>,
    pub transaction_log_repository: Arc<TransactionLogRepositoryImpl>,
}
