pub mod appointment_record_repository;
pub mod factory;
pub mod medical_record_repository;
pub mod pet_appointment_idx_repository;
pub mod pet_record_idx_repository;
pub mod provider_repository;
pub mod registry_state_repository;
pub mod transaction_log_repository;

pub use appointment_record_repository::AppointmentRecordRepositoryImpl;
pub use factory::{RegistryRepoFactory, RegistryRepositories};
pub use medical_record_repository::MedicalRecordRepositoryImpl;
pub use pet_appointment_idx_repository::PetAppointmentIdxRepositoryImpl;
pub use pet_record_idx_repository::PetRecordIdxRepositoryImpl;
pub use provider_repository::ProviderRepositoryImpl;
pub use registry_state_repository::RegistryStateRepositoryImpl;
pub use transaction_log_repository::TransactionLogRepositoryImpl;
