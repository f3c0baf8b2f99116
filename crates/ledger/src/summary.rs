//! Aggregate totals for one viewpoint.

use std::collections::BTreeMap;

use serde::Serialize;

use ntt_auth::RoleHint;
use ntt_core::{AccountId, SignedAmount, TokenAmount};

use crate::classify::classify;
use crate::kind::TxKind;
use crate::record::TransactionRecord;

/// Totals exchanged with a single counterparty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CounterpartyTotals {
    pub received: TokenAmount,
    pub sent: TokenAmount,
    pub net: SignedAmount,
    pub record_count: usize,
}

/// Derived view over a full record set. Recomputed on every fetch, never
/// persisted or updated incrementally.
///
/// Tracks:
/// - `total_received` / `total_sent` / `net` for the viewpoint
/// - the same per counterparty and per transaction kind
/// - `minted_total`, `revoked_total`, `returned_total` across the whole input,
///   regardless of viewpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub viewpoint: AccountId,
    pub role: RoleHint,
    pub total_received: TokenAmount,
    pub total_sent: TokenAmount,
    /// `total_received - total_sent`, exact and unclamped.
    pub net: SignedAmount,
    pub counterparties: BTreeMap<AccountId, CounterpartyTotals>,
    pub received_by_kind: BTreeMap<TxKind, TokenAmount>,
    pub sent_by_kind: BTreeMap<TxKind, TokenAmount>,
    pub minted_total: TokenAmount,
    pub revoked_total: TokenAmount,
    /// Entity → admin refunds without the revoke qualifier. Kept apart from
    /// `revoked_total`; neither is derived from the other.
    pub returned_total: TokenAmount,
    /// Records that counted as received or sent for the viewpoint.
    pub relevant_records: usize,
}

impl AggregateSummary {
    fn empty(viewpoint: AccountId, role: RoleHint) -> Self {
        Self {
            viewpoint,
            role,
            total_received: TokenAmount::zero(),
            total_sent: TokenAmount::zero(),
            net: SignedAmount::zero(),
            counterparties: BTreeMap::new(),
            received_by_kind: BTreeMap::new(),
            sent_by_kind: BTreeMap::new(),
            minted_total: TokenAmount::zero(),
            revoked_total: TokenAmount::zero(),
            returned_total: TokenAmount::zero(),
            relevant_records: 0,
        }
    }

    /// Amount sent under one kind (zero when none).
    pub fn sent_as(&self, kind: TxKind) -> TokenAmount {
        self.sent_by_kind.get(&kind).cloned().unwrap_or_default()
    }

    /// Amount received under one kind (zero when none).
    pub fn received_as(&self, kind: TxKind) -> TokenAmount {
        self.received_by_kind.get(&kind).cloned().unwrap_or_default()
    }
}

/// Summarize `records` from the point of view of `viewpoint` playing `role`.
///
/// Records need not be sorted or pre-filtered; anything that does not touch
/// the viewpoint only feeds the global counters. Pure function of its inputs.
pub fn summarize(records: &[TransactionRecord], viewpoint: &AccountId, role: RoleHint) -> AggregateSummary {
    let mut summary = AggregateSummary::empty(*viewpoint, role);

    for record in records {
        let flow = classify(record, viewpoint, role);

        if flow.minted {
            summary.minted_total += &record.amount;
        }
        if flow.revoked {
            summary.revoked_total += &record.amount;
        }
        if flow.returned {
            summary.returned_total += &record.amount;
        }

        if !flow.is_relevant() {
            continue;
        }
        summary.relevant_records += 1;

        // A self-transfer lands under the viewpoint itself.
        let counterparty = if flow.sent { record.to } else { record.from };
        let totals = summary.counterparties.entry(counterparty).or_default();
        totals.record_count += 1;

        if flow.received {
            summary.total_received += &record.amount;
            totals.received += &record.amount;
            *summary.received_by_kind.entry(record.kind).or_default() += &record.amount;
        }
        if flow.sent {
            summary.total_sent += &record.amount;
            totals.sent += &record.amount;
            *summary.sent_by_kind.entry(record.kind).or_default() += &record.amount;
        }
    }

    for totals in summary.counterparties.values_mut() {
        totals.net = SignedAmount::difference(&totals.received, &totals.sent);
    }
    summary.net = SignedAmount::difference(&summary.total_received, &summary.total_sent);

    tracing::debug!(
        viewpoint = %viewpoint.short(),
        %role,
        relevant = summary.relevant_records,
        total = records.len(),
        "ledger summary computed"
    );

    summary
}
