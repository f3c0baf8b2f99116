use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use ntt_auth::RoleHint;

use crate::record::MalformedRecordError;

/// Transaction kind as recorded by the token contract.
///
/// Closed set: the contract only ever writes these labels. Parsing is
/// case-insensitive and ignores whitespace, so `"nttToAdmin (revoke)"` and
/// `"NTTTOADMIN(revoke)"` are the same kind; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TxKind {
    /// Admin credits an entity (mint).
    AdminToEntity,
    /// Entity pays a user.
    EntityToUser,
    /// User pays an entity.
    UserToEntity,
    /// Entity refunds tokens to the admin.
    EntityToAdmin,
    /// Admin revokes tokens from an entity (entity removal).
    EntityToAdminRevoke,
}

impl TxKind {
    pub const ALL: [TxKind; 5] = [
        TxKind::AdminToEntity,
        TxKind::EntityToUser,
        TxKind::UserToEntity,
        TxKind::EntityToAdmin,
        TxKind::EntityToAdminRevoke,
    ];

    /// Label written by the contract.
    pub fn label(self) -> &'static str {
        match self {
            TxKind::AdminToEntity => "adminToNTT",
            TxKind::EntityToUser => "nttToUser",
            TxKind::UserToEntity => "userToNTT",
            TxKind::EntityToAdmin => "nttToAdmin",
            TxKind::EntityToAdminRevoke => "nttToAdmin (revoke)",
        }
    }

    /// Party the tokens leave.
    pub fn sender(self) -> RoleHint {
        match self {
            TxKind::AdminToEntity => RoleHint::Admin,
            TxKind::EntityToUser | TxKind::EntityToAdmin | TxKind::EntityToAdminRevoke => {
                RoleHint::Entity
            }
            TxKind::UserToEntity => RoleHint::User,
        }
    }

    /// Party the tokens arrive at.
    pub fn recipient(self) -> RoleHint {
        match self {
            TxKind::AdminToEntity | TxKind::UserToEntity => RoleHint::Entity,
            TxKind::EntityToUser => RoleHint::User,
            TxKind::EntityToAdmin | TxKind::EntityToAdminRevoke => RoleHint::Admin,
        }
    }

    pub fn is_revoke(self) -> bool {
        matches!(self, TxKind::EntityToAdminRevoke)
    }

    fn normalized(label: &str) -> String {
        label
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl core::fmt::Display for TxKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TxKind {
    type Err = MalformedRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = Self::normalized(s);
        TxKind::ALL
            .into_iter()
            .find(|k| Self::normalized(k.label()) == wanted)
            .ok_or_else(|| MalformedRecordError::UnknownKind(s.to_string()))
    }
}

impl Serialize for TxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TxKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
