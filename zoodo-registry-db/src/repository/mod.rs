pub mod create_batch;
pub mod exist_by_ids;
pub mod find_by_pet_id;
pub mod load_batch;
pub mod pagination;
pub mod registry_store;

// Re-exports
pub use create_batch::*;
pub use exist_by_ids::*;
pub use find_by_pet_id::*;
pub use load_batch::*;
pub use pagination::*;
pub use registry_store::*;
