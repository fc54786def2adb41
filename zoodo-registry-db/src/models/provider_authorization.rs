use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zoodo_registry_api::Address;

use crate::models::Identifiable;

/// # Documentation
/// - Authorization flag of a provider address.
/// - Toggled only by the owner; a revoked provider keeps its row with `is_authorized == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAuthorizationModel {
    pub address: Address,
    pub is_authorized: bool,
    pub updated_at: u64,
    pub updated_by: Address,
    pub transaction_id: Uuid,
}

impl Identifiable for ProviderAuthorizationModel {
    type Id = Address;

    fn get_id(&self) -> Address {
        self.address
    }
}
