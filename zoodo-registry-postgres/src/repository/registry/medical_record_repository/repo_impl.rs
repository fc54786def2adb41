use async_trait::async_trait;
use crate::executor::{Executor, TransactionAware, TransactionResult};
use crate::utils::{get_address, get_heapless_string, get_record_hash, get_u64, TryFromRow};
use moka::future::Cache;
use parking_lot::Mutex;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use zoodo_registry_api::RecordHash;
use zoodo_registry_db::models::MedicalRecordModel;

/// Medical records, fronted by a read cache shared across units of work.
///
/// Records are insert-only, so a cached record never goes stale. Records
/// created in the current transaction are held back and reach the cache only
/// once the transaction commits.
pub struct MedicalRecordRepositoryImpl {
    pub executor: Executor,
    pub record_cache: Cache<RecordHash, MedicalRecordModel>,
    pub(super) pending: Mutex<Vec<MedicalRecordModel>>,
}

impl MedicalRecordRepositoryImpl {
    pub fn new(executor: Executor, record_cache: Cache<RecordHash, MedicalRecordModel>) -> Self {
        Self {
            executor,
            record_cache,
            pending: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TransactionAware for MedicalRecordRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        let committed = std::mem::take(&mut *self.pending.lock());
        for record in committed {
            self.record_cache.insert(record.record_hash, record).await;
        }
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        self.pending.lock().clear();
        Ok(())
    }
}

impl TryFromRow<PgRow> for MedicalRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(MedicalRecordModel {
            record_hash: get_record_hash(row, "record_hash")?,
            pet_id: get_heapless_string(row, "pet_id")?,
            record_type: get_heapless_string(row, "record_type")?,
            timestamp: get_u64(row, "timestamp")?,
            submitted_by: get_address(row, "submitted_by")?,
            transaction_id: row.try_get("transaction_id")?,
        })
    }
}
