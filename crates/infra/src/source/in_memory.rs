use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ntt_auth::{Role, RoleCheck};
use ntt_core::AccountId;
use ntt_ledger::RawTransactionRecord;

use super::{EntityDetails, LedgerSource, SourceError};

#[derive(Debug, Default)]
struct State {
    entities: Vec<AccountId>,
    details: HashMap<AccountId, EntityDetails>,
    transactions: HashMap<AccountId, Vec<RawTransactionRecord>>,
    roles: HashSet<(Role, AccountId)>,
}

/// In-memory ledger source for tests/dev, and the backing store of a loaded
/// snapshot.
///
/// A writer that panics mid-update poisons the lock; the state is still used
/// afterwards since every update is a single insert or push.
#[derive(Debug, Default)]
pub struct InMemoryLedgerSource {
    inner: RwLock<State>,
}

impl InMemoryLedgerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `account` to the registry (or refresh its details).
    pub fn register_entity(&self, account: AccountId, details: EntityDetails) {
        let mut state = self.write();
        if !state.entities.contains(&account) {
            state.entities.push(account);
        }
        state.details.insert(account, details);
    }

    /// Append a record to `entity`'s history.
    ///
    /// The record is stored as given; nothing is validated here.
    pub fn record_transaction(&self, entity: AccountId, record: RawTransactionRecord) {
        self.write().transactions.entry(entity).or_default().push(record);
    }

    pub fn grant_role(&self, role: Role, account: AccountId) {
        self.write().roles.insert((role, account));
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoleCheck for InMemoryLedgerSource {
    fn has_role(&self, role: &Role, account: &AccountId) -> bool {
        self.read().roles.contains(&(role.clone(), *account))
    }
}

impl LedgerSource for InMemoryLedgerSource {
    fn entities(&self) -> Result<Vec<AccountId>, SourceError> {
        Ok(self.read().entities.clone())
    }

    fn entity_details(&self, account: &AccountId) -> Result<Option<EntityDetails>, SourceError> {
        Ok(self.read().details.get(account).cloned())
    }

    fn transactions(&self, entity: &AccountId) -> Result<Vec<RawTransactionRecord>, SourceError> {
        Ok(self
            .read()
            .transactions
            .get(entity)
            .cloned()
            .unwrap_or_default())
    }
}
