//! Provider status state machine and transition validation.
//!
//! Kept in a separate module so PRs touching lifecycle rules do not conflict
//! with PRs touching accrual, registration, or withdrawal.

use crate::types::{Error, ProviderStatus};

/// Validates if a provider status transition is allowed by the state machine.
///
/// # State Transition Rules
///
/// | From     | To       | Allowed |
/// |----------|----------|---------|
/// | Active   | Inactive | Yes (admin toggle)   |
/// | Inactive | Active   | Yes (admin toggle)   |
/// | Active   | Removed  | Yes (owner removal)  |
/// | Inactive | Removed  | No                   |
/// | Removed  | *any*    | No (terminal)        |
/// | *any*    | Same status | Yes (idempotent)  |
///
/// # Returns
/// * `Ok(())` if transition is valid
/// * `Err(Error::InvalidStateTransition)` if transition is invalid
pub fn validate_provider_transition(
    from: &ProviderStatus,
    to: &ProviderStatus,
) -> Result<(), Error> {
    // Same status is always allowed (idempotent)
    if from == to {
        return Ok(());
    }

    let valid = match from {
        ProviderStatus::Active => {
            matches!(to, ProviderStatus::Inactive | ProviderStatus::Removed)
        }
        ProviderStatus::Inactive => matches!(to, ProviderStatus::Active),
        ProviderStatus::Removed => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidStateTransition)
    }
}

/// Returns all valid target statuses for a given current status.
pub fn get_allowed_transitions(status: &ProviderStatus) -> &'static [ProviderStatus] {
    match status {
        ProviderStatus::Active => &[ProviderStatus::Inactive, ProviderStatus::Removed],
        ProviderStatus::Inactive => &[ProviderStatus::Active],
        ProviderStatus::Removed => &[],
    }
}

/// Checks if a transition is valid without returning an error.
///
/// Convenience wrapper around [`validate_provider_transition`] for boolean checks.
pub fn can_transition(from: &ProviderStatus, to: &ProviderStatus) -> bool {
    validate_provider_transition(from, to).is_ok()
}
