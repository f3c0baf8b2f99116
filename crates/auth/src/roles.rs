use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Contract role identifier used for RBAC (`hasRole(role, account)`).
///
/// Roles are opaque names at this layer (e.g. `"ADMIN_ROLE"`); hashing them
/// into the contract's role id is the ledger source's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN_ROLE"));
    pub const NTT: Role = Role(Cow::Borrowed("NTT_ROLE"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the token flow an account plays when viewing the ledger.
///
/// Every transaction kind moves tokens from one of these parties to another,
/// so the hint decides which records count as received or sent for a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleHint {
    Admin,
    Entity,
    User,
}

impl core::fmt::Display for RoleHint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            RoleHint::Admin => "admin",
            RoleHint::Entity => "entity",
            RoleHint::User => "user",
        })
    }
}
