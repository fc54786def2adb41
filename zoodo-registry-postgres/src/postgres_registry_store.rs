use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zoodo_registry_api::{Address, RecordHash};
use zoodo_registry_db::models::{
    AppointmentRecordModel, IdentifierString, Indexable, MedicalRecordModel,
    PetAppointmentIdxModel, PetRecordIdxModel, ProviderAuthorizationModel, RegistryStateModel,
    TransactionLogModel,
};
use zoodo_registry_db::repository::create_batch::CreateBatch;
use zoodo_registry_db::repository::exist_by_ids::ExistByIds;
use zoodo_registry_db::repository::find_by_pet_id::FindByPetId;
use zoodo_registry_db::repository::load_batch::LoadBatch;
use zoodo_registry_db::repository::pagination::{Page, PageRequest};
use zoodo_registry_db::repository::registry_store::{ChangeSet, RegistryStore, StoreResult};

use crate::config::PostgresConfig;
use crate::executor::Executor;
use crate::repository::db_init::init_database;
use crate::repository::registry::{RegistryRepoFactory, RegistryRepositories};

/// [`RegistryStore`] on PostgreSQL.
///
/// Every call runs in its own database transaction built from the shared
/// [`RegistryRepoFactory`]; a change set is applied inside one transaction and
/// committed only if every statement succeeded.
pub struct PostgresRegistryStore {
    pool: Arc<PgPool>,
    factory: Arc<RegistryRepoFactory>,
}

impl PostgresRegistryStore {
    pub fn new(pool: Arc<PgPool>, factory: Arc<RegistryRepoFactory>) -> Self {
        Self { pool, factory }
    }

    /// Connect with `config` and create the schema if it is missing.
    pub async fn connect(config: &PostgresConfig) -> StoreResult<Self> {
        let pool = config.connect().await?;
        init_database(&pool).await?;
        info!(
            max_connections = config.max_connections,
            record_cache_capacity = config.record_cache_capacity,
            "registry store connected"
        );
        Ok(Self::new(
            Arc::new(pool),
            RegistryRepoFactory::new(config.record_cache_capacity),
        ))
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    async fn session(&self) -> StoreResult<(Executor, RegistryRepositories)> {
        let executor = Executor::begin(&self.pool).await?;
        let repos = self.factory.build_all_repos(&executor);
        Ok((executor, repos))
    }

    /// Commit on success, roll back on failure.
    async fn finish<T>(executor: &Executor, result: StoreResult<T>) -> StoreResult<T> {
        match result {
            Ok(value) => {
                executor.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = executor.rollback().await {
                    warn!(%rollback_error, "rollback failed");
                }
                Err(error)
            }
        }
    }

    async fn initialize_state(
        repos: &RegistryRepositories,
        state: &RegistryStateModel,
    ) -> StoreResult<RegistryStateModel> {
        let repo = &repos.registry_state_repository;
        if repo.insert_if_absent(state).await? {
            return Ok(state.clone());
        }
        repo.load_state()
            .await?
            .ok_or_else(|| "registry state vanished during initialization".into())
    }

    async fn apply(repos: &RegistryRepositories, change_set: ChangeSet) -> StoreResult<()> {
        let expected_sequence = change_set.expected_sequence();
        let ChangeSet {
            transaction,
            state,
            provider,
            medical_record,
            appointment_record,
        } = change_set;

        repos
            .registry_state_repository
            .update_state(expected_sequence, &state)
            .await?;
        repos
            .transaction_log_repository
            .create_batch(vec![transaction])
            .await?;

        if let Some(provider) = provider {
            repos.provider_repository.upsert_batch(vec![provider]).await?;
        }

        if let Some(record) = medical_record {
            let exists = repos
                .medical_record_repository
                .exist_by_ids(&[record.record_hash])
                .await?;
            if exists.iter().any(|(_, exists)| *exists) {
                return Err(format!("medical record {} already stored", record.record_hash).into());
            }
            let position = repos
                .pet_record_idx_repository
                .next_position(record.pet_id.as_str())
                .await?;
            let idx = record.to_index(position)?;
            repos.medical_record_repository.create_batch(vec![record]).await?;
            repos.pet_record_idx_repository.create_batch(vec![idx]).await?;
        }

        if let Some(appointment) = appointment_record {
            let exists = repos
                .appointment_record_repository
                .exist_by_ids(&[appointment.appointment_id.clone()])
                .await?;
            if exists.iter().any(|(_, exists)| *exists) {
                return Err(format!("appointment {} already stored", appointment.appointment_id).into());
            }
            let position = repos
                .pet_appointment_idx_repository
                .next_position(appointment.pet_id.as_str())
                .await?;
            let idx = appointment.to_index(position)?;
            repos
                .appointment_record_repository
                .create_batch(vec![appointment])
                .await?;
            repos
                .pet_appointment_idx_repository
                .create_batch(vec![idx])
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl RegistryStore for PostgresRegistryStore {
    async fn initialize(&self, state: RegistryStateModel) -> StoreResult<RegistryStateModel> {
        let (executor, repos) = self.session().await?;
        let result = Self::initialize_state(&repos, &state).await;
        Self::finish(&executor, result).await
    }

    async fn load_state(&self) -> StoreResult<Option<RegistryStateModel>> {
        let (executor, repos) = self.session().await?;
        let result = repos.registry_state_repository.load_state().await;
        Self::finish(&executor, result).await
    }

    async fn find_provider(
        &self,
        address: &Address,
    ) -> StoreResult<Option<ProviderAuthorizationModel>> {
        let (executor, repos) = self.session().await?;
        let result = repos.provider_repository.load_batch(&[*address]).await;
        let loaded = Self::finish(&executor, result).await?;
        Ok(loaded.into_iter().next().flatten())
    }

    async fn find_medical_record(
        &self,
        record_hash: &RecordHash,
    ) -> StoreResult<Option<MedicalRecordModel>> {
        if let Some(record) = self.factory.medical_record_cache().get(record_hash).await {
            debug!(%record_hash, "medical record cache hit");
            return Ok(Some(record));
        }

        let (executor, repos) = self.session().await?;
        let result = repos
            .medical_record_repository
            .load_batch(&[*record_hash])
            .await;
        let loaded = Self::finish(&executor, result).await?;
        let record = loaded.into_iter().next().flatten();
        if let Some(record) = &record {
            self.factory
                .medical_record_cache()
                .insert(record.record_hash, record.clone())
                .await;
        }
        Ok(record)
    }

    async fn find_pet_records(&self, pet_id: &str) -> StoreResult<Vec<PetRecordIdxModel>> {
        let (executor, repos) = self.session().await?;
        let result = repos.pet_record_idx_repository.find_by_pet_id(pet_id).await;
        Self::finish(&executor, result).await
    }

    async fn find_appointment_record(
        &self,
        appointment_id: &str,
    ) -> StoreResult<Option<AppointmentRecordModel>> {
        // Longer than any stored id, so it cannot exist.
        let Ok(key) = IdentifierString::try_from(appointment_id) else {
            return Ok(None);
        };

        let (executor, repos) = self.session().await?;
        let result = repos.appointment_record_repository.load_batch(&[key]).await;
        let loaded = Self::finish(&executor, result).await?;
        Ok(loaded.into_iter().next().flatten())
    }

    async fn find_pet_appointments(
        &self,
        pet_id: &str,
    ) -> StoreResult<Vec<PetAppointmentIdxModel>> {
        let (executor, repos) = self.session().await?;
        let result = repos
            .pet_appointment_idx_repository
            .find_by_pet_id(pet_id)
            .await;
        Self::finish(&executor, result).await
    }

    async fn load_transactions(&self, page: PageRequest) -> StoreResult<Page<TransactionLogModel>> {
        let (executor, repos) = self.session().await?;
        let result = repos.transaction_log_repository.load_page(page).await;
        Self::finish(&executor, result).await
    }

    async fn commit(&self, change_set: ChangeSet) -> StoreResult<()> {
        let sequence = change_set.transaction.sequence;
        let (executor, repos) = self.session().await?;
        let result = Self::apply(&repos, change_set).await;
        Self::finish(&executor, result).await?;
        debug!(sequence, "change set committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::setup_test_context;
    use serial_test::serial;
    use zoodo_registry_api::{CallContext, MedicalRecordRegistry, RegistryError};
    use zoodo_registry_db::service::{ManualClock, RegistryService};

    fn random_address() -> Address {
        Address::from_bytes(rand::random::<[u8; 20]>())
    }

    async fn deploy(
        store: PostgresRegistryStore,
    ) -> Result<(RegistryService<PostgresRegistryStore>, Address), Box<dyn std::error::Error + Send + Sync>> {
        let owner = random_address();
        let service = RegistryService::deploy(
            Arc::new(store),
            Arc::new(ManualClock::new(1_704_067_200)),
            owner,
        )
        .await?;
        Ok((service, owner))
    }

    #[tokio::test]
    #[serial]
    async fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (registry, owner) = deploy(ctx.store()).await?;
        let owner = CallContext::new(owner);
        let vet = CallContext::new(random_address());

        registry.authorize_provider(&owner, vet.caller).await?;
        assert!(registry.is_authorized_provider(vet.caller).await?);

        let hashes: Vec<_> = ["Vaccination record 1", "Checkup record 1"]
            .iter()
            .map(|content| RecordHash::digest(content.as_bytes()))
            .collect();
        registry.store_medical_record(&vet, hashes[0], "PET-001", "Vaccination").await?;
        registry.store_medical_record(&vet, hashes[1], "PET-001", "Checkup").await?;
        registry
            .store_appointment_record(&vet, RecordHash::digest(b"Follow-up"), "APT-001", "PET-001")
            .await?;

        assert_eq!(registry.get_pet_records("PET-001").await?, hashes);
        assert_eq!(registry.get_pet_appointments("PET-001").await?, vec!["APT-001".to_string()]);
        assert!(registry.verify_appointment_record("APT-001").await?);
        let summary = registry.get_medical_record(hashes[1]).await?;
        assert_eq!(summary.pet_id, "PET-001");
        assert!(summary.exists);

        registry.pause(&owner).await?;
        assert_eq!(
            registry
                .store_medical_record(&vet, RecordHash::digest(b"late"), "PET-001", "Checkup")
                .await,
            Err(RegistryError::ContractPaused)
        );
        assert_eq!(
            registry.get_contract_stats().await?.as_tuple(),
            (2, 1, true, owner.caller)
        );

        let log = registry.transactions(PageRequest::default()).await?;
        let sequences: Vec<_> = log.items.iter().map(|receipt| receipt.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_duplicate_rolls_back_whole_change_set() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let store = ctx.store();
        let state = store
            .initialize(RegistryStateModel::new(random_address(), 1_704_067_200))
            .await?;

        let hash = RecordHash::digest(b"Test record");
        let record = |transaction_id| MedicalRecordModel {
            record_hash: hash,
            pet_id: IdentifierString::try_from("PET-001").unwrap(),
            record_type: "Vaccination".try_into().unwrap(),
            timestamp: 1_704_067_200,
            submitted_by: random_address(),
            transaction_id,
        };
        let change_set = |state: &RegistryStateModel| {
            let transaction = TransactionLogModel {
                id: uuid::Uuid::new_v4(),
                sequence: state.last_sequence + 1,
                executed_at: 1_704_067_200,
                caller: random_address(),
                operation: zoodo_registry_api::RegistryOperation::StoreMedicalRecord,
                subject: hash.to_string(),
            };
            let mut next = state.clone();
            next.last_sequence = transaction.sequence;
            next.total_medical_records += 1;
            let mut change_set = ChangeSet::new(transaction.clone(), next);
            change_set.medical_record = Some(record(transaction.id));
            change_set
        };

        store.commit(change_set(&state)).await?;
        let state = store.load_state().await?.unwrap();
        assert!(store.commit(change_set(&state)).await.is_err());

        assert_eq!(store.load_state().await?, Some(state));
        assert_eq!(store.find_pet_records("PET-001").await?.len(), 1);
        assert_eq!(store.load_transactions(PageRequest::default()).await?.total, 1);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_stale_change_set_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let (registry, owner) = deploy(ctx.store()).await?;
        registry.pause(&CallContext::new(owner)).await?;

        // a second service over the same database, racing the first
        let other = PostgresRegistryStore::new(ctx.pool.clone(), ctx.factory.clone());
        let state = other.load_state().await?.unwrap();
        let transaction = TransactionLogModel {
            id: uuid::Uuid::new_v4(),
            sequence: state.last_sequence,
            executed_at: state.last_timestamp,
            caller: owner,
            operation: zoodo_registry_api::RegistryOperation::Unpause,
            subject: owner.to_string(),
        };
        let mut stale = state.clone();
        stale.paused = false;
        assert!(other.commit(ChangeSet::new(transaction, stale)).await.is_err());
        assert!(registry.is_paused().await?);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_keys_read_as_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let store = ctx.store();

        assert!(store.load_state().await?.is_none());
        assert!(store.find_provider(&random_address()).await?.is_none());
        assert!(store.find_medical_record(&RecordHash::digest(b"nothing")).await?.is_none());
        assert!(store.find_appointment_record(&"A".repeat(2_000)).await?.is_none());
        assert!(store.find_pet_appointments("PET-404").await?.is_empty());
        Ok(())
    }
}
