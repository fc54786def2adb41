//! Registry schema setup and teardown
//!
//! The SQL files under `migrations/` and `cleanup/` are compiled into the
//! crate, so a deployed binary needs no access to the source tree. Every
//! migration is idempotent and `init_database` runs on each connect.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

/// One schema unit: the statements creating it and the ones dropping it.
struct SchemaStep {
    name: &'static str,
    create: &'static str,
    drop: &'static str,
}

/// Creation order. Later steps reference tables of earlier ones.
const SCHEMA: &[SchemaStep] = &[
    SchemaStep {
        name: "registry_state",
        create: include_str!("../../migrations/001_registry_state.sql"),
        drop: include_str!("../../cleanup/001_registry_state.sql"),
    },
    SchemaStep {
        name: "provider_authorization",
        create: include_str!("../../migrations/002_provider_authorization.sql"),
        drop: include_str!("../../cleanup/002_provider_authorization.sql"),
    },
    SchemaStep {
        name: "medical_record",
        create: include_str!("../../migrations/003_medical_record.sql"),
        drop: include_str!("../../cleanup/003_medical_record.sql"),
    },
    SchemaStep {
        name: "appointment_record",
        create: include_str!("../../migrations/004_appointment_record.sql"),
        drop: include_str!("../../cleanup/004_appointment_record.sql"),
    },
];

/// Create every registry table, type and index that does not exist yet.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use zoodo_registry_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for step in SCHEMA {
        apply(&mut tx, step.name, step.create).await?;
    }
    tx.commit().await
}

/// Drop the registry schema, dependents first.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for step in SCHEMA.iter().rev() {
        apply(&mut tx, step.name, step.drop).await?;
    }
    tx.commit().await
}

async fn apply(
    tx: &mut Transaction<'static, Postgres>,
    name: &str,
    sql: &str,
) -> Result<(), sqlx::Error> {
    debug!(step = name, "applying schema step");
    sqlx::raw_sql(sql).execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostgresConfig;
    use serial_test::serial;

    async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(table)
            .fetch_one(pool)
            .await
    }

    #[test]
    fn test_schema_steps_pair_create_with_drop() {
        for step in SCHEMA {
            assert!(step.create.contains("CREATE"), "{} has no create", step.name);
            assert!(step.drop.contains("DROP"), "{} has no drop", step.name);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_init_and_cleanup() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let pool = PostgresConfig::from_env()?.connect().await?;

        init_database(&pool).await?;
        // idempotent
        init_database(&pool).await?;
        assert!(table_exists(&pool, "medical_record").await?);

        cleanup_database(&pool).await?;
        assert!(!table_exists(&pool, "medical_record").await?);
        assert!(!table_exists(&pool, "registry_state").await?);

        init_database(&pool).await?;
        assert!(table_exists(&pool, "pet_appointment_idx").await?);

        Ok(())
    }
}
