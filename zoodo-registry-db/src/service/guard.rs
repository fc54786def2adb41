use zoodo_registry_api::{Address, RegistryError, RegistryResult};

use crate::models::RegistryStateModel;

/// A condition a write must satisfy before it touches state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    OnlyOwner,
    OnlyAuthorizedProvider,
    WhenNotPaused,
    WhenPaused,
}

/// Owner-only writes that must not run while paused (`pause`).
pub const OWNER_WHEN_NOT_PAUSED: &[Precondition] =
    &[Precondition::OnlyOwner, Precondition::WhenNotPaused];
/// Owner-only writes that require the paused state (`unpause`).
pub const OWNER_WHEN_PAUSED: &[Precondition] =
    &[Precondition::OnlyOwner, Precondition::WhenPaused];
/// Owner-only writes allowed in either state.
pub const OWNER_ONLY: &[Precondition] = &[Precondition::OnlyOwner];
/// Record and appointment submissions.
pub const PROVIDER_WHEN_NOT_PAUSED: &[Precondition] = &[
    Precondition::OnlyAuthorizedProvider,
    Precondition::WhenNotPaused,
];

/// Snapshot of everything the preconditions look at.
///
/// `caller_authorized` is only consulted by [`Precondition::OnlyAuthorizedProvider`];
/// callers that never check it may pass `false`.
#[derive(Debug, Clone, Copy)]
pub struct Guard<'a> {
    pub state: &'a RegistryStateModel,
    pub caller: Address,
    pub caller_authorized: bool,
}

impl<'a> Guard<'a> {
    pub fn new(state: &'a RegistryStateModel, caller: Address, caller_authorized: bool) -> Self {
        Self {
            state,
            caller,
            caller_authorized,
        }
    }

    /// Evaluate `preconditions` in order and fail on the first one that does not hold.
    pub fn check(&self, preconditions: &[Precondition]) -> RegistryResult<()> {
        preconditions
            .iter()
            .try_for_each(|precondition| self.check_one(*precondition))
    }

    fn check_one(&self, precondition: Precondition) -> RegistryResult<()> {
        match precondition {
            Precondition::OnlyOwner if self.caller != self.state.owner => {
                Err(RegistryError::NotOwner)
            }
            Precondition::OnlyAuthorizedProvider if !self.caller_authorized => {
                Err(RegistryError::NotAuthorizedProvider)
            }
            Precondition::WhenNotPaused if self.state.paused => Err(RegistryError::ContractPaused),
            Precondition::WhenPaused if !self.state.paused => Err(RegistryError::NotPaused),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::from_bytes([1u8; 20]);
    const VET: Address = Address::from_bytes([2u8; 20]);

    fn state(paused: bool) -> RegistryStateModel {
        let mut state = RegistryStateModel::new(OWNER, 0);
        state.paused = paused;
        state
    }

    #[test]
    fn test_provider_checked_before_pause() {
        let paused = state(true);
        let guard = Guard::new(&paused, VET, false);
        assert_eq!(
            guard.check(PROVIDER_WHEN_NOT_PAUSED),
            Err(RegistryError::NotAuthorizedProvider)
        );

        let guard = Guard::new(&paused, VET, true);
        assert_eq!(
            guard.check(PROVIDER_WHEN_NOT_PAUSED),
            Err(RegistryError::ContractPaused)
        );
    }

    #[test]
    fn test_owner_only() {
        let active = state(false);
        assert_eq!(
            Guard::new(&active, VET, true).check(OWNER_ONLY),
            Err(RegistryError::NotOwner)
        );
        assert!(Guard::new(&active, OWNER, false).check(OWNER_ONLY).is_ok());
    }

    #[test]
    fn test_pause_state_preconditions() {
        let active = state(false);
        let paused = state(true);
        assert!(Guard::new(&active, OWNER, false)
            .check(OWNER_WHEN_NOT_PAUSED)
            .is_ok());
        assert_eq!(
            Guard::new(&paused, OWNER, false).check(OWNER_WHEN_NOT_PAUSED),
            Err(RegistryError::ContractPaused)
        );
        assert_eq!(
            Guard::new(&active, OWNER, false).check(OWNER_WHEN_PAUSED),
            Err(RegistryError::NotPaused)
        );
        // ownership is checked first
        assert_eq!(
            Guard::new(&active, VET, false).check(OWNER_WHEN_PAUSED),
            Err(RegistryError::NotOwner)
        );
    }

    #[test]
    fn test_owner_is_not_implicitly_a_provider() {
        let active = state(false);
        assert_eq!(
            Guard::new(&active, OWNER, false).check(PROVIDER_WHEN_NOT_PAUSED),
            Err(RegistryError::NotAuthorizedProvider)
        );
    }
}
