//! Partition of a viewpoint's records by counterparty.

use std::collections::HashMap;

use serde::Serialize;

use ntt_core::{AccountId, SignedAmount, TokenAmount};

use crate::record::TransactionRecord;

/// Everything exchanged between the viewpoint and one counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartyGroup {
    pub counterparty: AccountId,
    pub received: TokenAmount,
    pub sent: TokenAmount,
    pub net: SignedAmount,
    /// Most recent first.
    pub records: Vec<TransactionRecord>,
}

/// Groups in first-encounter order of the input.
///
/// Never contains a group without records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartyGroups {
    pub viewpoint: AccountId,
    groups: Vec<CounterpartyGroup>,
    #[serde(skip)]
    index: HashMap<AccountId, usize>,
}

impl CounterpartyGroups {
    fn new(viewpoint: AccountId) -> Self {
        Self {
            viewpoint,
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, counterparty: &AccountId) -> Option<&CounterpartyGroup> {
        self.index.get(counterparty).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CounterpartyGroup> {
        self.groups.iter()
    }

    pub fn counterparties(&self) -> impl Iterator<Item = &AccountId> {
        self.groups.iter().map(|g| &g.counterparty)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<CounterpartyGroup> {
        self.groups
    }

    fn entry(&mut self, counterparty: AccountId) -> &mut CounterpartyGroup {
        let next = self.groups.len();
        let i = *self.index.entry(counterparty).or_insert(next);
        if i == next {
            self.groups.push(CounterpartyGroup {
                counterparty,
                received: TokenAmount::zero(),
                sent: TokenAmount::zero(),
                net: SignedAmount::zero(),
                records: Vec::new(),
            });
        }
        &mut self.groups[i]
    }
}

impl<'a> IntoIterator for &'a CounterpartyGroups {
    type Item = &'a CounterpartyGroup;
    type IntoIter = core::slice::Iter<'a, CounterpartyGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Order records most recent first.
///
/// Sorts by timestamp (stable, so equal timestamps keep ledger order) and then
/// reverses; input order is never trusted to be chronological.
pub fn sort_most_recent_first(records: &mut [TransactionRecord]) {
    records.sort_by_key(|r| r.timestamp);
    records.reverse();
}

/// Partition the records touching `viewpoint` by the account on the other side.
///
/// Records that do not involve the viewpoint are dropped. Within a group,
/// records are ordered by `sort_most_recent_first`.
pub fn group_by_counterparty(records: &[TransactionRecord], viewpoint: &AccountId) -> CounterpartyGroups {
    let mut groups = CounterpartyGroups::new(*viewpoint);

    for record in records {
        let Some(counterparty) = record.counterparty_of(viewpoint) else {
            continue;
        };

        let group = groups.entry(counterparty);
        if record.to == *viewpoint {
            group.received += &record.amount;
        }
        if record.from == *viewpoint {
            group.sent += &record.amount;
        }
        group.records.push(record.clone());
    }

    for group in &mut groups.groups {
        sort_most_recent_first(&mut group.records);
        group.net = SignedAmount::difference(&group.received, &group.sent);
    }

    groups
}
