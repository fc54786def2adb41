pub mod repo_impl;
pub mod load_state;
pub mod save_state;

pub use repo_impl::RegistryStateRepositoryImpl;
