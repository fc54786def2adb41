pub mod memory_store;
pub mod models;
pub mod repository;
pub mod service;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub use memory_store::InMemoryRegistryStore;
pub use models::*;
pub use repository::*;
pub use service::*;
