use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;
use zoodo_registry_api::{
    Address, AppointmentRecord, CallContext, ContractStats, MedicalRecord, MedicalRecordRegistry,
    MedicalRecordSummary, RecordHash, RegistryError, RegistryOperation, RegistryResult,
    StoreAppointmentRecordRequest, StoreMedicalRecordRequest, TransactionReceipt,
};

use crate::models::{
    AppointmentRecordModel, MedicalRecordModel, ProviderAuthorizationModel, RegistryStateModel,
    TransactionLogModel,
};
use crate::repository::pagination::{Page, PageRequest};
use crate::repository::registry_store::{ChangeSet, RegistryStore};
use crate::service::clock::Clock;
use crate::service::guard::{
    Guard, OWNER_ONLY, OWNER_WHEN_NOT_PAUSED, OWNER_WHEN_PAUSED, PROVIDER_WHEN_NOT_PAUSED,
};

fn storage_error(error: Box<dyn Error + Send + Sync>) -> RegistryError {
    RegistryError::StorageError(error.to_string())
}

fn log_rejection(
    operation: RegistryOperation,
    caller: Address,
    result: RegistryResult<TransactionReceipt>,
) -> RegistryResult<TransactionReceipt> {
    if let Err(error) = &result {
        warn!(%operation, %caller, reason = %error, "transaction rejected");
    }
    result
}

/// The registry: access control, record store and appointment store over one
/// [`RegistryStore`].
///
/// Writes are serialized behind `write_gate`, so the load, check and commit of
/// one write never interleave with another. Reads go straight to the store.
pub struct RegistryService<S: RegistryStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    write_gate: Mutex<()>,
}

impl<S: RegistryStore + 'static> RegistryService<S> {
    /// Deploy a registry owned by `owner`, or attach to the deployment `store` already holds.
    ///
    /// When the store is already initialized its recorded owner is kept.
    pub async fn deploy(store: Arc<S>, clock: Arc<dyn Clock>, owner: Address) -> RegistryResult<Self> {
        if owner.is_zero() {
            return Err(RegistryError::InvalidOwner);
        }

        let state = store
            .initialize(RegistryStateModel::new(owner, clock.now()))
            .await
            .map_err(storage_error)?;
        if state.last_sequence == 0 && state.owner == owner {
            info!(%owner, deployed_at = state.deployed_at, "registry deployed");
        } else {
            debug!(owner = %state.owner, last_sequence = state.last_sequence, "attached to existing registry");
        }

        Ok(Self::from_parts(store, clock))
    }

    /// Attach to the deployment held by `store`.
    pub async fn attach(store: Arc<S>, clock: Arc<dyn Clock>) -> RegistryResult<Self> {
        let state = store
            .load_state()
            .await
            .map_err(storage_error)?
            .ok_or(RegistryError::NotDeployed)?;
        debug!(owner = %state.owner, last_sequence = state.last_sequence, "attached to existing registry");

        Ok(Self::from_parts(store, clock))
    }

    fn from_parts(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Committed transactions in sequence order.
    pub async fn transactions(&self, page: PageRequest) -> RegistryResult<Page<TransactionReceipt>> {
        let page = self
            .store
            .load_transactions(page)
            .await
            .map_err(storage_error)?;
        Ok(page.map(|entry| entry.to_receipt()))
    }

    async fn current_state(&self) -> RegistryResult<RegistryStateModel> {
        self.store
            .load_state()
            .await
            .map_err(storage_error)?
            .ok_or(RegistryError::NotDeployed)
    }

    async fn provider_authorized(&self, address: &Address) -> RegistryResult<bool> {
        Ok(self
            .store
            .find_provider(address)
            .await
            .map_err(storage_error)?
            .is_some_and(|provider| provider.is_authorized))
    }

    /// Log entry and post-transaction state for the next write on top of `state`.
    fn next_transaction(
        &self,
        state: &RegistryStateModel,
        caller: Address,
        operation: RegistryOperation,
        subject: String,
    ) -> ChangeSet {
        let (sequence, executed_at) = state.next_block(self.clock.now());
        let transaction = TransactionLogModel {
            id: Uuid::new_v4(),
            sequence,
            executed_at,
            caller,
            operation,
            subject,
        };
        let mut next = state.clone();
        next.last_sequence = sequence;
        next.last_timestamp = executed_at;
        ChangeSet::new(transaction, next)
    }

    async fn commit(&self, change_set: ChangeSet) -> RegistryResult<TransactionReceipt> {
        let receipt = change_set.transaction.to_receipt();
        self.store.commit(change_set).await.map_err(storage_error)?;
        info!(
            operation = %receipt.operation,
            sequence = receipt.sequence,
            caller = %receipt.caller,
            subject = %receipt.subject,
            "transaction committed"
        );
        Ok(receipt)
    }

    async fn set_provider(
        &self,
        ctx: &CallContext,
        provider: Address,
        is_authorized: bool,
    ) -> RegistryResult<TransactionReceipt> {
        let operation = if is_authorized {
            RegistryOperation::AuthorizeProvider
        } else {
            RegistryOperation::RevokeProvider
        };

        let _gate = self.write_gate.lock().await;
        let state = self.current_state().await?;
        Guard::new(&state, ctx.caller, false).check(OWNER_ONLY)?;

        let mut change_set =
            self.next_transaction(&state, ctx.caller, operation, provider.to_string());
        change_set.provider = Some(ProviderAuthorizationModel {
            address: provider,
            is_authorized,
            updated_at: change_set.transaction.executed_at,
            updated_by: ctx.caller,
            transaction_id: change_set.transaction.id,
        });
        self.commit(change_set).await
    }

    async fn set_paused(&self, ctx: &CallContext, paused: bool) -> RegistryResult<TransactionReceipt> {
        let (operation, preconditions) = if paused {
            (RegistryOperation::Pause, OWNER_WHEN_NOT_PAUSED)
        } else {
            (RegistryOperation::Unpause, OWNER_WHEN_PAUSED)
        };

        let _gate = self.write_gate.lock().await;
        let state = self.current_state().await?;
        Guard::new(&state, ctx.caller, false).check(preconditions)?;

        let mut change_set =
            self.next_transaction(&state, ctx.caller, operation, ctx.caller.to_string());
        change_set.state.paused = paused;
        self.commit(change_set).await
    }

    async fn change_owner(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> RegistryResult<TransactionReceipt> {
        let _gate = self.write_gate.lock().await;
        let state = self.current_state().await?;
        Guard::new(&state, ctx.caller, false).check(OWNER_ONLY)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidOwner);
        }

        let mut change_set = self.next_transaction(
            &state,
            ctx.caller,
            RegistryOperation::TransferOwnership,
            new_owner.to_string(),
        );
        change_set.state.owner = new_owner;
        self.commit(change_set).await
    }

    async fn add_medical_record(
        &self,
        ctx: &CallContext,
        request: StoreMedicalRecordRequest,
    ) -> RegistryResult<TransactionReceipt> {
        let request = request.validated()?;

        let _gate = self.write_gate.lock().await;
        let state = self.current_state().await?;
        let authorized = self.provider_authorized(&ctx.caller).await?;
        Guard::new(&state, ctx.caller, authorized).check(PROVIDER_WHEN_NOT_PAUSED)?;

        let existing = self
            .store
            .find_medical_record(&request.record_hash)
            .await
            .map_err(storage_error)?;
        if existing.is_some() {
            return Err(RegistryError::DuplicateRecord(request.record_hash));
        }

        let mut change_set = self.next_transaction(
            &state,
            ctx.caller,
            RegistryOperation::StoreMedicalRecord,
            request.record_hash.to_string(),
        );
        let record = MedicalRecordModel::from_request(
            &request,
            ctx.caller,
            change_set.transaction.executed_at,
            change_set.transaction.id,
        )
        .map_err(|e| RegistryError::ValidationError(e.to_string()))?;
        change_set.state.total_medical_records += 1;
        change_set.medical_record = Some(record);
        self.commit(change_set).await
    }

    async fn add_appointment_record(
        &self,
        ctx: &CallContext,
        request: StoreAppointmentRecordRequest,
    ) -> RegistryResult<TransactionReceipt> {
        let request = request.validated()?;

        let _gate = self.write_gate.lock().await;
        let state = self.current_state().await?;
        let authorized = self.provider_authorized(&ctx.caller).await?;
        Guard::new(&state, ctx.caller, authorized).check(PROVIDER_WHEN_NOT_PAUSED)?;

        let existing = self
            .store
            .find_appointment_record(&request.appointment_id)
            .await
            .map_err(storage_error)?;
        if existing.is_some() {
            return Err(RegistryError::DuplicateAppointment(request.appointment_id));
        }

        let mut change_set = self.next_transaction(
            &state,
            ctx.caller,
            RegistryOperation::StoreAppointmentRecord,
            request.appointment_id.clone(),
        );
        let appointment = AppointmentRecordModel::from_request(
            &request,
            ctx.caller,
            change_set.transaction.executed_at,
            change_set.transaction.id,
        )
        .map_err(|e| RegistryError::ValidationError(e.to_string()))?;
        change_set.state.total_appointment_records += 1;
        change_set.appointment_record = Some(appointment);
        self.commit(change_set).await
    }
}

#[async_trait]
impl<S: RegistryStore + 'static> MedicalRecordRegistry for RegistryService<S> {
    async fn authorize_provider(
        &self,
        ctx: &CallContext,
        provider: Address,
    ) -> RegistryResult<TransactionReceipt> {
        let result = self.set_provider(ctx, provider, true).await;
        log_rejection(RegistryOperation::AuthorizeProvider, ctx.caller, result)
    }

    async fn revoke_provider(
        &self,
        ctx: &CallContext,
        provider: Address,
    ) -> RegistryResult<TransactionReceipt> {
        let result = self.set_provider(ctx, provider, false).await;
        log_rejection(RegistryOperation::RevokeProvider, ctx.caller, result)
    }

    async fn is_authorized_provider(&self, provider: Address) -> RegistryResult<bool> {
        self.provider_authorized(&provider).await
    }

    async fn pause(&self, ctx: &CallContext) -> RegistryResult<TransactionReceipt> {
        let result = self.set_paused(ctx, true).await;
        log_rejection(RegistryOperation::Pause, ctx.caller, result)
    }

    async fn unpause(&self, ctx: &CallContext) -> RegistryResult<TransactionReceipt> {
        let result = self.set_paused(ctx, false).await;
        log_rejection(RegistryOperation::Unpause, ctx.caller, result)
    }

    async fn is_paused(&self) -> RegistryResult<bool> {
        Ok(self.current_state().await?.paused)
    }

    async fn owner(&self) -> RegistryResult<Address> {
        Ok(self.current_state().await?.owner)
    }

    async fn transfer_ownership(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> RegistryResult<TransactionReceipt> {
        let result = self.change_owner(ctx, new_owner).await;
        log_rejection(RegistryOperation::TransferOwnership, ctx.caller, result)
    }

    async fn store_medical_record(
        &self,
        ctx: &CallContext,
        record_hash: RecordHash,
        pet_id: &str,
        record_type: &str,
    ) -> RegistryResult<TransactionReceipt> {
        let request = StoreMedicalRecordRequest::new(record_hash, pet_id, record_type);
        let result = self.add_medical_record(ctx, request).await;
        log_rejection(RegistryOperation::StoreMedicalRecord, ctx.caller, result)
    }

    async fn verify_medical_record(&self, record_hash: RecordHash) -> RegistryResult<bool> {
        Ok(self
            .store
            .find_medical_record(&record_hash)
            .await
            .map_err(storage_error)?
            .is_some())
    }

    async fn get_medical_record(
        &self,
        record_hash: RecordHash,
    ) -> RegistryResult<MedicalRecordSummary> {
        Ok(self
            .get_medical_record_details(record_hash)
            .await?
            .map(|record| record.summary())
            .unwrap_or_default())
    }

    async fn get_medical_record_details(
        &self,
        record_hash: RecordHash,
    ) -> RegistryResult<Option<MedicalRecord>> {
        let record = self
            .store
            .find_medical_record(&record_hash)
            .await
            .map_err(storage_error)?;
        Ok(record.as_ref().map(MedicalRecord::from))
    }

    async fn get_pet_records(&self, pet_id: &str) -> RegistryResult<Vec<RecordHash>> {
        let entries = self
            .store
            .find_pet_records(pet_id)
            .await
            .map_err(storage_error)?;
        Ok(entries.into_iter().map(|entry| entry.record_hash).collect())
    }

    async fn get_total_medical_records(&self) -> RegistryResult<u64> {
        Ok(self.current_state().await?.total_medical_records)
    }

    async fn store_appointment_record(
        &self,
        ctx: &CallContext,
        appointment_hash: RecordHash,
        appointment_id: &str,
        pet_id: &str,
    ) -> RegistryResult<TransactionReceipt> {
        let request = StoreAppointmentRecordRequest::new(appointment_hash, appointment_id, pet_id);
        let result = self.add_appointment_record(ctx, request).await;
        log_rejection(RegistryOperation::StoreAppointmentRecord, ctx.caller, result)
    }

    async fn verify_appointment_record(&self, appointment_id: &str) -> RegistryResult<bool> {
        Ok(self.get_appointment_record(appointment_id).await?.is_some())
    }

    async fn get_appointment_record(
        &self,
        appointment_id: &str,
    ) -> RegistryResult<Option<AppointmentRecord>> {
        let appointment = self
            .store
            .find_appointment_record(appointment_id)
            .await
            .map_err(storage_error)?;
        Ok(appointment.as_ref().map(AppointmentRecord::from))
    }

    async fn get_pet_appointments(&self, pet_id: &str) -> RegistryResult<Vec<String>> {
        let entries = self
            .store
            .find_pet_appointments(pet_id)
            .await
            .map_err(storage_error)?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.appointment_id.to_string())
            .collect())
    }

    async fn get_total_appointment_records(&self) -> RegistryResult<u64> {
        Ok(self.current_state().await?.total_appointment_records)
    }

    async fn get_contract_stats(&self) -> RegistryResult<ContractStats> {
        Ok(self.current_state().await?.to_stats())
    }
}
