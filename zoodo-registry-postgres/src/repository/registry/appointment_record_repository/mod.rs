pub mod repo_impl;
pub mod create_batch;
pub mod exist_by_ids;
pub mod load_batch;

pub use repo_impl::AppointmentRecordRepositoryImpl;
