use crate::utils::TryFromRow;
use std::error::Error;
use zoodo_registry_db::models::RegistryStateModel;

use super::repo_impl::RegistryStateRepositoryImpl;

impl RegistryStateRepositoryImpl {
    /// The single registry state row, if the registry has been deployed.
    pub async fn load_state(
        &self,
    ) -> Result<Option<RegistryStateModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM registry_state WHERE id = 1"#;
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).fetch_optional(&mut **transaction).await?
        };

        row.as_ref().map(RegistryStateModel::try_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_load_state_before_deployment() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (executor, repos) = ctx.session().await?;

        assert!(repos.registry_state_repository.load_state().await?.is_none());

        executor.rollback().await?;
        Ok(())
    }
}
