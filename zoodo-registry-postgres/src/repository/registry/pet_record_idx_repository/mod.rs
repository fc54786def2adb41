pub mod repo_impl;
pub mod create_batch;
pub mod find_by_pet_id;

pub use repo_impl::PetRecordIdxRepositoryImpl;
