use async_trait::async_trait;
use sqlx::Database;

use crate::models::index::Index;

/// Generic repository trait for reading a pet's index entries
///
/// Entries come back ordered by position, i.e. in submission order.
/// An unknown pet yields an empty vector, not an error.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The index entity type that must implement Index trait
#[async_trait]
pub trait FindByPetId<DB: Database, T: Index>: Send + Sync {
    /// Find all index entries of `pet_id`
    ///
    /// # Arguments
    /// * `pet_id` - The external pet identifier
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The entries ordered by position
    /// * `Err` - An error if the query could not be executed
    async fn find_by_pet_id(
        &self,
        pet_id: &str,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
