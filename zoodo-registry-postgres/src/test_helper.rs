//! Test helper module for database-backed tests
//!
//! Tests connect through `DATABASE_URL` and run by default. Each context
//! creates the schema if needed and empties every registry table, so tests
//! using it must run with `#[serial]`. Repository tests work inside one
//! `session()` and roll it back; store tests commit and rely on the reset.

use crate::config::PostgresConfig;
use crate::executor::Executor;
use crate::postgres_registry_store::PostgresRegistryStore;
use crate::repository::db_init::init_database;
use crate::repository::registry::{RegistryRepoFactory, RegistryRepositories};
use sqlx::PgPool;
use std::sync::Arc;

pub struct TestContext {
    pub pool: Arc<PgPool>,
    pub factory: Arc<RegistryRepoFactory>,
}

impl TestContext {
    /// Open a transaction and build all repositories on it
    pub async fn session(
        &self,
    ) -> Result<(Executor, RegistryRepositories), Box<dyn std::error::Error + Send + Sync>> {
        let executor = Executor::begin(&self.pool).await?;
        let repos = self.factory.build_all_repos(&executor);
        Ok((executor, repos))
    }

    pub fn store(&self) -> PostgresRegistryStore {
        PostgresRegistryStore::new(self.pool.clone(), self.factory.clone())
    }
}

/// Setup a test context on an empty registry schema
///
/// Reads `DATABASE_URL` like the production configuration does.
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let config = PostgresConfig::from_env()?;
    let pool = config.connect().await?;

    init_database(&pool).await?;
    sqlx::raw_sql(
        r#"
        TRUNCATE pet_appointment_idx, appointment_record, pet_record_idx, medical_record,
                 provider_authorization, transaction_log, registry_state
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(TestContext {
        pool: Arc::new(pool),
        factory: RegistryRepoFactory::new(100),
    })
}
