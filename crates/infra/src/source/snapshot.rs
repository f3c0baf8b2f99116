//! JSON snapshot of the contract's readable state.
//!
//! ```json
//! {
//!   "roles": { "ADMIN_ROLE": ["0x…"] },
//!   "entities": [{
//!     "address": "0x…", "name": "…", "physicalAddress": "…",
//!     "balance": "1000000000000000000",
//!     "transactions": [{ "txType": "adminToNTT", "from": "0x…", "to": "0x…",
//!                        "amount": "…", "timestamp": 1700000000 }]
//!   }]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use ntt_auth::Role;
use ntt_core::{AccountId, TokenAmount};
use ntt_ledger::RawTransactionRecord;

use super::{EntityDetails, InMemoryLedgerSource, SourceError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Role name → holders.
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<AccountId>>,
    #[serde(default)]
    pub entities: Vec<SnapshotEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntity {
    pub address: AccountId,
    pub name: String,
    #[serde(default)]
    pub physical_address: String,
    pub balance: TokenAmount,
    /// Kept raw: malformed records are the views' problem, not the loader's.
    #[serde(default)]
    pub transactions: Vec<RawTransactionRecord>,
}

impl LedgerSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: LedgerSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            entities = snapshot.entities.len(),
            "ledger snapshot loaded"
        );
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SourceError> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.address) {
                return Err(SourceError::Invalid(format!(
                    "entity {} listed more than once",
                    entity.address
                )));
            }
        }
        Ok(())
    }

    pub fn into_source(self) -> InMemoryLedgerSource {
        let source = InMemoryLedgerSource::new();

        for (role, holders) in self.roles {
            for holder in holders {
                source.grant_role(Role::new(role.clone()), holder);
            }
        }

        for entity in self.entities {
            source.register_entity(
                entity.address,
                EntityDetails {
                    name: entity.name,
                    physical_address: entity.physical_address,
                    balance: entity.balance,
                },
            );
            for record in entity.transactions {
                source.record_transaction(entity.address, record);
            }
        }

        source
    }
}

impl InMemoryLedgerSource {
    /// Load a snapshot file into a fresh in-memory source.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Ok(LedgerSnapshot::load(path)?.into_source())
    }
}
