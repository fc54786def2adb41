//! In-process registry store.
//!
//! Holds one deployment in memory behind a single `parking_lot::RwLock`; a
//! commit validates the whole change set and applies it under one write guard,
//! so readers never observe half of a transaction.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use zoodo_registry_api::{Address, RecordHash};

use crate::models::{
    AppointmentRecordModel, Indexable, MedicalRecordModel, PetAppointmentIdxModel,
    PetRecordIdxModel, ProviderAuthorizationModel, RegistryStateModel, TransactionLogModel,
};
use crate::repository::pagination::{Page, PageRequest};
use crate::repository::registry_store::{ChangeSet, RegistryStore, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    registry: Option<RegistryStateModel>,
    providers: HashMap<Address, ProviderAuthorizationModel>,
    medical_records: HashMap<RecordHash, MedicalRecordModel>,
    pet_records: HashMap<String, Vec<PetRecordIdxModel>>,
    appointments: HashMap<String, AppointmentRecordModel>,
    pet_appointments: HashMap<String, Vec<PetAppointmentIdxModel>>,
    transactions: Vec<TransactionLogModel>,
}

#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    inner: RwLock<MemoryState>,
}

impl InMemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistryStore {
    async fn initialize(&self, state: RegistryStateModel) -> StoreResult<RegistryStateModel> {
        let mut inner = self.inner.write();
        Ok(inner.registry.get_or_insert(state).clone())
    }

    async fn load_state(&self) -> StoreResult<Option<RegistryStateModel>> {
        Ok(self.inner.read().registry.clone())
    }

    async fn find_provider(
        &self,
        address: &Address,
    ) -> StoreResult<Option<ProviderAuthorizationModel>> {
        Ok(self.inner.read().providers.get(address).cloned())
    }

    async fn find_medical_record(
        &self,
        record_hash: &RecordHash,
    ) -> StoreResult<Option<MedicalRecordModel>> {
        Ok(self.inner.read().medical_records.get(record_hash).cloned())
    }

    async fn find_pet_records(&self, pet_id: &str) -> StoreResult<Vec<PetRecordIdxModel>> {
        Ok(self
            .inner
            .read()
            .pet_records
            .get(pet_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_appointment_record(
        &self,
        appointment_id: &str,
    ) -> StoreResult<Option<AppointmentRecordModel>> {
        Ok(self.inner.read().appointments.get(appointment_id).cloned())
    }

    async fn find_pet_appointments(
        &self,
        pet_id: &str,
    ) -> StoreResult<Vec<PetAppointmentIdxModel>> {
        Ok(self
            .inner
            .read()
            .pet_appointments
            .get(pet_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_transactions(&self, page: PageRequest) -> StoreResult<Page<TransactionLogModel>> {
        let inner = self.inner.read();
        let total = inner.transactions.len();
        let items = inner.transactions[page.bounds(total)].to_vec();
        Ok(Page::new(items, total, page.limit, page.offset))
    }

    async fn commit(&self, change_set: ChangeSet) -> StoreResult<()> {
        let mut inner = self.inner.write();

        let stored_sequence = inner
            .registry
            .as_ref()
            .map(|state| state.last_sequence)
            .ok_or("registry has not been initialized")?;
        if stored_sequence != change_set.expected_sequence() {
            return Err(format!(
                "stale change set: store is at sequence {stored_sequence}, transaction {} expects {}",
                change_set.transaction.sequence,
                change_set.expected_sequence()
            )
            .into());
        }

        // Validate everything before the first mutation.
        let record_idx = match &change_set.medical_record {
            Some(record) => {
                if inner.medical_records.contains_key(&record.record_hash) {
                    return Err(format!("medical record {} already stored", record.record_hash).into());
                }
                let position = inner
                    .pet_records
                    .get(record.pet_id.as_str())
                    .map_or(0, |entries| entries.len() as u64);
                Some(record.to_index(position)?)
            }
            None => None,
        };
        let appointment_idx = match &change_set.appointment_record {
            Some(appointment) => {
                if inner.appointments.contains_key(appointment.appointment_id.as_str()) {
                    return Err(format!(
                        "appointment {} already stored",
                        appointment.appointment_id
                    )
                    .into());
                }
                let position = inner
                    .pet_appointments
                    .get(appointment.pet_id.as_str())
                    .map_or(0, |entries| entries.len() as u64);
                Some(appointment.to_index(position)?)
            }
            None => None,
        };

        let ChangeSet {
            transaction,
            state,
            provider,
            medical_record,
            appointment_record,
        } = change_set;

        if let Some(provider) = provider {
            inner.providers.insert(provider.address, provider);
        }
        if let (Some(record), Some(idx)) = (medical_record, record_idx) {
            inner
                .pet_records
                .entry(idx.pet_id.to_string())
                .or_default()
                .push(idx);
            inner.medical_records.insert(record.record_hash, record);
        }
        if let (Some(appointment), Some(idx)) = (appointment_record, appointment_idx) {
            inner
                .pet_appointments
                .entry(idx.pet_id.to_string())
                .or_default()
                .push(idx);
            inner
                .appointments
                .insert(appointment.appointment_id.to_string(), appointment);
        }
        inner.transactions.push(transaction);
        inner.registry = Some(state);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        create_test_medical_record, create_test_transaction, random_address,
    };
    use tokio_test::{assert_err, assert_ok};
    use zoodo_registry_api::RegistryOperation;

    async fn initialized_store() -> (InMemoryRegistryStore, RegistryStateModel) {
        let store = InMemoryRegistryStore::new();
        let state = store
            .initialize(RegistryStateModel::new(random_address(), 1_000))
            .await
            .unwrap();
        (store, state)
    }

    fn record_change_set(
        state: &RegistryStateModel,
        record: MedicalRecordModel,
    ) -> ChangeSet {
        let transaction = create_test_transaction(
            state.last_sequence + 1,
            RegistryOperation::StoreMedicalRecord,
        );
        let mut next = state.clone();
        next.last_sequence = transaction.sequence;
        next.total_medical_records += 1;
        let mut change_set = ChangeSet::new(transaction, next);
        change_set.medical_record = Some(record);
        change_set
    }

    #[tokio::test]
    async fn test_initialize_keeps_first_deployment() {
        let (store, first) = initialized_store().await;
        let second = store
            .initialize(RegistryStateModel::new(random_address(), 2_000))
            .await
            .unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_commit_appends_pet_index_in_order() {
        let (store, state) = initialized_store().await;
        let first = create_test_medical_record("PET-1", b"Vaccination record 1");
        let second = create_test_medical_record("PET-1", b"Checkup record 1");

        assert_ok!(store.commit(record_change_set(&state, first.clone())).await);
        let state = store.load_state().await.unwrap().unwrap();
        assert_ok!(store.commit(record_change_set(&state, second.clone())).await);

        let entries = store.find_pet_records("PET-1").await.unwrap();
        let hashes: Vec<_> = entries.iter().map(|e| e.record_hash).collect();
        assert_eq!(hashes, vec![first.record_hash, second.record_hash]);
        assert_eq!(entries[1].position, 1);
        assert!(store.find_pet_records("PET-404").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_record_leaves_store_untouched() {
        let (store, state) = initialized_store().await;
        let record = create_test_medical_record("PET-1", b"Test record");
        assert_ok!(store.commit(record_change_set(&state, record.clone())).await);

        let state = store.load_state().await.unwrap().unwrap();
        assert_err!(store.commit(record_change_set(&state, record)).await);

        let after = store.load_state().await.unwrap().unwrap();
        assert_eq!(after, state);
        assert_eq!(store.find_pet_records("PET-1").await.unwrap().len(), 1);
        assert_eq!(
            store.load_transactions(PageRequest::default()).await.unwrap().total,
            1
        );
    }

    #[tokio::test]
    async fn test_stale_sequence_rejected() {
        let (store, state) = initialized_store().await;
        let record = create_test_medical_record("PET-1", b"Test record");
        let mut change_set = record_change_set(&state, record);
        change_set.transaction.sequence = 5;

        assert_err!(store.commit(change_set).await);
        assert!(store
            .find_medical_record(&RecordHash::digest(b"Test record"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_load_transactions_pages() {
        let (store, mut state) = initialized_store().await;
        for i in 0..5u8 {
            let record = create_test_medical_record("PET-1", &[i]);
            store.commit(record_change_set(&state, record)).await.unwrap();
            state = store.load_state().await.unwrap().unwrap();
        }

        let page = store.load_transactions(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        let sequences: Vec<_> = page.items.iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![3, 4]);
        assert!(page.has_more());
    }
}
