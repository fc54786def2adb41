use std::hash::Hash;

/// Trait for entities that can be uniquely identified by a key
pub trait Identifiable {
    /// The key type: a record hash, an address, an appointment id, ...
    type Id: Clone + Eq + Hash + Send + Sync;

    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Self::Id;
}
