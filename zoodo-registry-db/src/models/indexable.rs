use std::error::Error;

use super::index::Index;

/// Trait for records that are listed in an append-only per-pet index
pub trait Indexable {
    /// The associated Index type that this type can be converted to
    type IndexType: Index;

    /// Converts this record to its index entry at `position` in the pet's sequence
    fn to_index(&self, position: u64) -> Result<Self::IndexType, Box<dyn Error + Send + Sync>>;
}
