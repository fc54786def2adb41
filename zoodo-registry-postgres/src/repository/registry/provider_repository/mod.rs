pub mod repo_impl;
pub mod load_batch;
pub mod upsert_batch;

pub use repo_impl::ProviderRepositoryImpl;
