pub mod appointment_record;
pub mod identifiable;
pub mod index;
pub mod indexable;
pub mod medical_record;
pub mod pet_appointment_idx;
pub mod pet_record_idx;
pub mod provider_authorization;
pub mod registry_state;
pub mod transaction_log;

// Re-exports
pub use appointment_record::*;
pub use identifiable::*;
pub use index::*;
pub use indexable::*;
pub use medical_record::*;
pub use pet_appointment_idx::*;
pub use pet_record_idx::*;
pub use provider_authorization::*;
pub use registry_state::*;
pub use transaction_log::*;

/// Byte capacity of stored pet and appointment identifiers; a UTF-8 character takes up to 4 bytes.
pub const IDENTIFIER_CAPACITY: usize = 4 * zoodo_registry_api::MAX_IDENTIFIER_CHARS;
/// Byte capacity of stored record type labels.
pub const RECORD_TYPE_CAPACITY: usize = 4 * zoodo_registry_api::MAX_RECORD_TYPE_CHARS;

pub type IdentifierString = heapless::String<IDENTIFIER_CAPACITY>;
pub type RecordTypeString = heapless::String<RECORD_TYPE_CAPACITY>;
