use std::sync::Arc;

use thiserror::Error;

use ntt_core::AccountId;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {account} lacks role '{role}'")]
    Forbidden { account: AccountId, role: Role },
}

/// Role predicate answered by the token contract (`hasRole`).
///
/// Implementations must be side-effect free from the caller's point of view.
pub trait RoleCheck {
    fn has_role(&self, role: &Role, account: &AccountId) -> bool;
}

impl<C> RoleCheck for Arc<C>
where
    C: RoleCheck + ?Sized,
{
    fn has_role(&self, role: &Role, account: &AccountId) -> bool {
        (**self).has_role(role, account)
    }
}

/// Require `account` to hold `role`.
///
/// - No IO beyond what the `RoleCheck` itself does
/// - No panics
pub fn require_role<C>(check: &C, role: &Role, account: &AccountId) -> Result<(), AuthzError>
where
    C: RoleCheck + ?Sized,
{
    if check.has_role(role, account) {
        Ok(())
    } else {
        tracing::debug!(account = %account.short(), role = %role, "role check denied");
        Err(AuthzError::Forbidden {
            account: *account,
            role: role.clone(),
        })
    }
}
