pub mod config;
pub mod executor;
pub mod postgres_registry_store;
pub mod repository;
pub mod utils;

pub use config::{ConfigError, PostgresConfig};
pub use executor::{Executor, TransactionAware};
pub use postgres_registry_store::PostgresRegistryStore;
pub use repository::registry::{RegistryRepoFactory, RegistryRepositories};

#[cfg(test)]
pub mod test_helper;
