use heapless::String as HeaplessString;
use serde::Serialize;
use std::error::Error;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// This provides a stable hash across different runs and systems by:
/// - Serializing the data to CBOR format (deterministic binary representation)
/// - Using XxHash64 with a fixed seed (0) for consistent hashing
///
/// Used for the `pet_id_hash` lookup columns of the pet indices.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Copies `value` into a bounded string, failing when it exceeds `N` bytes.
pub fn bounded_string<const N: usize>(
    value: &str,
    field: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    HeaplessString::try_from(value)
        .map_err(|_| format!("Value for '{field}' is too long (max {N} bytes)").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_as_i64_is_deterministic() {
        let a = hash_as_i64(&"PET-001").unwrap();
        let b = hash_as_i64(&"PET-001").unwrap();
        let c = hash_as_i64(&"PET-002").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_bounded_string_limit() {
        let ok: HeaplessString<8> = bounded_string("PET-001", "pet_id").unwrap();
        assert_eq!(ok.as_str(), "PET-001");
        assert!(bounded_string::<4>("PET-001", "pet_id").is_err());
    }
}
