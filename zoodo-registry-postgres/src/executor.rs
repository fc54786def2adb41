use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use sqlx::{PgPool, Postgres, Transaction};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type TransactionResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Repositories holding state that must follow the fate of the transaction,
/// such as read caches that may only see committed rows.
#[async_trait]
pub trait TransactionAware: Send + Sync {
    async fn on_commit(&self) -> TransactionResult<()>;

    async fn on_rollback(&self) -> TransactionResult<()>;
}

/// Shared handle on one open database transaction.
///
/// Every repository built for a unit of work holds a clone of the same
/// executor, so all their statements run in one transaction. Once the
/// transaction is committed or rolled back the slot is empty and further use
/// fails with "Transaction has been consumed".
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
    participants: Arc<ParkingMutex<Vec<Arc<dyn TransactionAware>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
            participants: Arc::new(ParkingMutex::new(Vec::new())),
        }
    }

    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self::new(pool.begin().await?))
    }

    pub fn register_transaction_aware(&self, participant: Arc<dyn TransactionAware>) {
        self.participants.lock().push(participant);
    }

    pub async fn commit(&self) -> TransactionResult<()> {
        let transaction = self
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        transaction.commit().await?;

        for participant in self.take_participants() {
            participant.on_commit().await?;
        }
        Ok(())
    }

    pub async fn rollback(&self) -> TransactionResult<()> {
        let transaction = self
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        transaction.rollback().await?;

        for participant in self.take_participants() {
            participant.on_rollback().await?;
        }
        Ok(())
    }

    fn take_participants(&self) -> Vec<Arc<dyn TransactionAware>> {
        std::mem::take(&mut *self.participants.lock())
    }
}
