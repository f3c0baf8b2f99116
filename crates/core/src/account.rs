//! Account identifiers as issued by the token contract.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Number of bytes in an account identifier.
pub const ACCOUNT_LEN: usize = 20;

/// Identifier of an account on the ledger (admin, entity or user wallet).
///
/// Parsed from the usual `0x`-prefixed, 40 hex digit form. Hex casing is not
/// significant: `0xABCD..` and `0xabcd..` are the same account, and the
/// canonical rendering is lowercase.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; ACCOUNT_LEN]);

impl AccountId {
    pub const fn from_bytes(bytes: [u8; ACCOUNT_LEN]) -> Self {
        Self(bytes)
    }

    /// Short form used in log lines (`0x1234…abcd`).
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl core::fmt::Debug for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| DomainError::invalid_account(format!("{trimmed:?}: missing 0x prefix")))?;

        if digits.len() != ACCOUNT_LEN * 2 {
            return Err(DomainError::invalid_account(format!(
                "{trimmed:?}: expected {} hex digits, found {}",
                ACCOUNT_LEN * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; ACCOUNT_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| DomainError::invalid_account(format!("{trimmed:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
