//! Read interface of the token contract.
//!
//! Mirrors the contract calls the dashboards rely on:
//! - `getAllNTTs` → [`LedgerSource::entities`]
//! - `getNTTDetails` → [`LedgerSource::entity_details`]
//! - `getNTTTransactions` → [`LedgerSource::transactions`]
//! - `hasRole` → [`RoleCheck::has_role`]

pub mod in_memory;
pub mod snapshot;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ntt_auth::RoleCheck;
use ntt_core::{AccountId, TokenAmount};
use ntt_ledger::RawTransactionRecord;

pub use in_memory::InMemoryLedgerSource;
pub use snapshot::LedgerSnapshot;

/// Registry entry of an entity as the contract reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDetails {
    pub name: String,
    pub physical_address: String,
    /// On-chain balance in base units.
    pub balance: TokenAmount,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read ledger snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse ledger snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid ledger snapshot: {0}")]
    Invalid(String),

    #[error("ledger source unavailable: {0}")]
    Unavailable(String),
}

/// Black-box read access to the ledger.
///
/// Transactions come back raw: validation (and the skip policy for malformed
/// records) belongs to the caller.
pub trait LedgerSource: RoleCheck + Send + Sync {
    /// Registered entities, in registry order.
    fn entities(&self) -> Result<Vec<AccountId>, SourceError>;

    /// Registry details, `None` when `account` is not a registered entity.
    fn entity_details(&self, account: &AccountId) -> Result<Option<EntityDetails>, SourceError>;

    /// Complete history of `entity`, in ledger order.
    fn transactions(&self, entity: &AccountId) -> Result<Vec<RawTransactionRecord>, SourceError>;
}

impl<S> LedgerSource for Arc<S>
where
    S: LedgerSource + ?Sized,
{
    fn entities(&self) -> Result<Vec<AccountId>, SourceError> {
        (**self).entities()
    }

    fn entity_details(&self, account: &AccountId) -> Result<Option<EntityDetails>, SourceError> {
        (**self).entity_details(account)
    }

    fn transactions(&self, entity: &AccountId) -> Result<Vec<RawTransactionRecord>, SourceError> {
        (**self).transactions(entity)
    }
}
