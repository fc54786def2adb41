use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::str::FromStr;
use zoodo_registry_api::{Address, RecordHash};

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

pub fn get_address(row: &PgRow, col_name: &str) -> Result<Address, Box<dyn Error + Send + Sync>> {
    let bytes: Vec<u8> = row.try_get(col_name)?;
    Ok(Address::from_slice(&bytes)?)
}

pub fn get_record_hash(
    row: &PgRow,
    col_name: &str,
) -> Result<RecordHash, Box<dyn Error + Send + Sync>> {
    let bytes: Vec<u8> = row.try_get(col_name)?;
    Ok(RecordHash::from_slice(&bytes)?)
}

/// Reads a `BIGINT` column holding an unsigned counter or timestamp.
pub fn get_u64(row: &PgRow, col_name: &str) -> Result<u64, Box<dyn Error + Send + Sync>> {
    let value: i64 = row.try_get(col_name)?;
    u64::try_from(value)
        .map_err(|_| format!("Value for column '{col_name}' is negative: {value}").into())
}

/// Converts an unsigned counter or timestamp for a `BIGINT` bind.
pub fn to_i64(value: u64) -> Result<i64, Box<dyn Error + Send + Sync>> {
    i64::try_from(value).map_err(|_| format!("Value {value} does not fit in BIGINT").into())
}
