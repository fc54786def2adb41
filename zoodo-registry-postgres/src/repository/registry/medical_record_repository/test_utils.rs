#[cfg(test)]
pub mod test_utils {
    use crate::repository::registry::RegistryRepositories;
    use heapless::String as HeaplessString;
    use uuid::Uuid;
    use zoodo_registry_api::{Address, RecordHash, RegistryOperation};
    use zoodo_registry_db::models::{MedicalRecordModel, TransactionLogModel};
    use zoodo_registry_db::repository::create_batch::CreateBatch;

    pub fn create_test_medical_record(
        pet_id: &str,
        content: &[u8],
        transaction_id: Uuid,
    ) -> MedicalRecordModel {
        MedicalRecordModel {
            record_hash: RecordHash::digest(content),
            pet_id: HeaplessString::try_from(pet_id).unwrap(),
            record_type: HeaplessString::try_from("Vaccination").unwrap(),
            timestamp: 1_704_067_200,
            submitted_by: Address::from_bytes(rand::random::<[u8; 20]>()),
            transaction_id,
        }
    }

    /// Log entry that records in the same unit of work can reference.
    pub async fn insert_test_transaction(
        repos: &RegistryRepositories,
        sequence: u64,
    ) -> Result<TransactionLogModel, Box<dyn std::error::Error + Send + Sync>> {
        let transaction = TransactionLogModel {
            id: Uuid::new_v4(),
            sequence,
            executed_at: 1_704_067_200,
            caller: Address::from_bytes(rand::random::<[u8; 20]>()),
            operation: RegistryOperation::StoreMedicalRecord,
            subject: String::new(),
        };
        repos
            .transaction_log_repository
            .create_batch(vec![transaction.clone()])
            .await?;
        Ok(transaction)
    }
}
