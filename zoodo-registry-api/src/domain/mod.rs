pub mod address;
pub mod appointment_record;
pub mod contract_stats;
pub mod medical_record;
pub mod record_hash;
pub mod requests;
pub mod transaction;

pub use address::*;
pub use appointment_record::*;
pub use contract_stats::*;
pub use medical_record::*;
pub use record_hash::*;
pub use requests::*;
pub use transaction::*;

use crate::error::{RegistryError, RegistryResult};

/// Decodes a hex string, with or without a `0x` prefix, into exactly `N` bytes.
pub(crate) fn decode_fixed_hex<const N: usize>(value: &str, what: &str) -> RegistryResult<[u8; N]> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    let mut bytes = [0u8; N];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
        RegistryError::ValidationError(format!("invalid {what} '{value}': {e}"))
    })?;
    Ok(bytes)
}
