use crate::utils::to_i64;
use std::error::Error;
use zoodo_registry_db::models::RegistryStateModel;

use super::repo_impl::RegistryStateRepositoryImpl;

impl RegistryStateRepositoryImpl {
    /// Insert the state row unless one exists. Returns whether a row was inserted.
    pub async fn insert_if_absent(
        &self,
        state: &RegistryStateModel,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            INSERT INTO registry_state (
                id, owner, paused, total_medical_records, total_appointment_records,
                last_sequence, last_timestamp, deployed_at
            )
            VALUES (1, $1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(state.owner.as_bytes().as_slice())
        .bind(state.paused)
        .bind(to_i64(state.total_medical_records)?)
        .bind(to_i64(state.total_appointment_records)?)
        .bind(to_i64(state.last_sequence)?)
        .bind(to_i64(state.last_timestamp)?)
        .bind(to_i64(state.deployed_at)?)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Replace the state row, provided it is still at `expected_sequence`.
    ///
    /// The conditional update also row-locks the state until the transaction
    /// ends, which orders concurrent writers from other processes.
    pub async fn update_state(
        &self,
        expected_sequence: u64,
        state: &RegistryStateModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE registry_state
            SET owner = $1,
                paused = $2,
                total_medical_records = $3,
                total_appointment_records = $4,
                last_sequence = $5,
                last_timestamp = $6
            WHERE id = 1 AND last_sequence = $7
            "#,
        )
        .bind(state.owner.as_bytes().as_slice())
        .bind(state.paused)
        .bind(to_i64(state.total_medical_records)?)
        .bind(to_i64(state.total_appointment_records)?)
        .bind(to_i64(state.last_sequence)?)
        .bind(to_i64(state.last_timestamp)?)
        .bind(to_i64(expected_sequence)?)
        .execute(&mut **transaction)
        .await?;

        if result.rows_affected() != 1 {
            return Err(format!(
                "stale change set: registry is no longer at sequence {expected_sequence}"
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use zoodo_registry_api::Address;
    use zoodo_registry_db::models::RegistryStateModel;

    #[tokio::test]
    #[serial]
    async fn test_insert_if_absent_keeps_first_row() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;
        let repo = &repos.registry_state_repository;

        let first = RegistryStateModel::new(Address::from_bytes([1u8; 20]), 1_704_067_200);
        let second = RegistryStateModel::new(Address::from_bytes([2u8; 20]), 1_704_067_300);

        assert!(repo.insert_if_absent(&first).await?);
        assert!(!repo.insert_if_absent(&second).await?);
        assert_eq!(repo.load_state().await?, Some(first));

        executor.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_update_state_requires_expected_sequence() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;
        let repo = &repos.registry_state_repository;

        let state = RegistryStateModel::new(Address::from_bytes([1u8; 20]), 1_704_067_200);
        repo.insert_if_absent(&state).await?;

        let mut next = state.clone();
        next.last_sequence = 1;
        next.paused = true;
        assert!(repo.update_state(5, &next).await.is_err());
        repo.update_state(0, &next).await?;
        assert_eq!(repo.load_state().await?, Some(next));

        executor.rollback().await?;
        Ok(())
    }
}
