use async_trait::async_trait;

use crate::domain::{
    Address, AppointmentRecord, CallContext, ContractStats, MedicalRecord, MedicalRecordSummary,
    RecordHash, TransactionReceipt,
};
use crate::error::RegistryResult;

/// Public call interface of the medical record registry.
///
/// Write operations take the [`CallContext`] of the submitting account and
/// either commit entirely, returning a [`TransactionReceipt`], or fail with no
/// state change. Read operations never fail for unknown keys; they return zero
/// or empty values instead.
///
/// # Example
/// ```ignore
/// registry.authorize_provider(&owner_ctx, vet).await?;
/// let hash = RecordHash::digest(b"Rabies vaccination - 2024-01-15");
/// registry.store_medical_record(&vet_ctx, hash, "PET-001", "Vaccination").await?;
/// assert!(registry.verify_medical_record(hash).await?);
/// ```
#[async_trait]
pub trait MedicalRecordRegistry: Send + Sync {
    // ----- access control -----

    /// Grant write rights to `provider`. Owner only; idempotent.
    async fn authorize_provider(
        &self,
        ctx: &CallContext,
        provider: Address,
    ) -> RegistryResult<TransactionReceipt>;

    /// Withdraw write rights from `provider`. Owner only; idempotent.
    async fn revoke_provider(
        &self,
        ctx: &CallContext,
        provider: Address,
    ) -> RegistryResult<TransactionReceipt>;

    async fn is_authorized_provider(&self, provider: Address) -> RegistryResult<bool>;

    /// Halt all writes. Owner only; fails with `ContractPaused` when already paused.
    async fn pause(&self, ctx: &CallContext) -> RegistryResult<TransactionReceipt>;

    /// Resume writes. Owner only; fails with `NotPaused` when not paused.
    async fn unpause(&self, ctx: &CallContext) -> RegistryResult<TransactionReceipt>;

    async fn is_paused(&self) -> RegistryResult<bool>;

    async fn owner(&self) -> RegistryResult<Address>;

    /// Hand the owner role to `new_owner`. Owner only; the zero address is rejected.
    async fn transfer_ownership(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> RegistryResult<TransactionReceipt>;

    // ----- medical records -----

    /// Anchor `record_hash` for `pet_id`.
    ///
    /// # Arguments
    /// * `ctx` - The submitting provider, must be authorized
    /// * `record_hash` - Digest of the off-chain record, must not be stored yet
    /// * `pet_id` - External pet identifier; the hash is appended to its index
    /// * `record_type` - Free-form label such as `"Vaccination"`
    async fn store_medical_record(
        &self,
        ctx: &CallContext,
        record_hash: RecordHash,
        pet_id: &str,
        record_type: &str,
    ) -> RegistryResult<TransactionReceipt>;

    async fn verify_medical_record(&self, record_hash: RecordHash) -> RegistryResult<bool>;

    async fn get_medical_record(
        &self,
        record_hash: RecordHash,
    ) -> RegistryResult<MedicalRecordSummary>;

    async fn get_medical_record_details(
        &self,
        record_hash: RecordHash,
    ) -> RegistryResult<Option<MedicalRecord>>;

    /// Record hashes of `pet_id` in submission order; empty for unknown pets.
    async fn get_pet_records(&self, pet_id: &str) -> RegistryResult<Vec<RecordHash>>;

    async fn get_total_medical_records(&self) -> RegistryResult<u64>;

    // ----- appointments -----

    /// Anchor an appointment. Keyed by `appointment_id`, which must not be stored yet.
    async fn store_appointment_record(
        &self,
        ctx: &CallContext,
        appointment_hash: RecordHash,
        appointment_id: &str,
        pet_id: &str,
    ) -> RegistryResult<TransactionReceipt>;

    /// Existence check by appointment id (not by hash).
    async fn verify_appointment_record(&self, appointment_id: &str) -> RegistryResult<bool>;

    async fn get_appointment_record(
        &self,
        appointment_id: &str,
    ) -> RegistryResult<Option<AppointmentRecord>>;

    async fn get_pet_appointments(&self, pet_id: &str) -> RegistryResult<Vec<String>>;

    async fn get_total_appointment_records(&self) -> RegistryResult<u64>;

    // ----- stats -----

    async fn get_contract_stats(&self) -> RegistryResult<ContractStats>;
}
