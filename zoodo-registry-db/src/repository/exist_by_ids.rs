use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for checking existence of multiple entities by their IDs
///
/// Returns a vector of tuples where each tuple contains the key and a boolean indicating existence.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type whose key type is checked
#[async_trait]
pub trait ExistByIds<DB: Database, T: Identifiable>: Send + Sync {
    /// Check existence of multiple entities by their unique identifiers
    ///
    /// # Arguments
    /// * `ids` - The keys to check
    ///
    /// # Returns
    /// * `Ok(Vec<(T::Id, bool)>)` - A vector of tuples mapping each key to its existence status
    /// * `Err` - An error if the query could not be executed
    async fn exist_by_ids(
        &self,
        ids: &[T::Id],
    ) -> Result<Vec<(T::Id, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
