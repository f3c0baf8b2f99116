use serde::Serialize;

use ntt_auth::RoleHint;
use ntt_core::{AccountId, TokenAmount};
use ntt_ledger::{
    coerce_records, export_csv_with, group_by_counterparty, sort_most_recent_first, summarize,
    AggregateSummary, CounterpartyGroup, CsvOptions, TransactionRecord, TxKind,
};

use super::{fetch_records, require_entity, ViewError};
use crate::source::LedgerSource;

/// Read model: one entity's transaction history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityHistory {
    pub entity: AccountId,
    pub name: String,
    pub summary: AggregateSummary,
    pub sent_to_users: TokenAmount,
    /// Refunds and revocations together; the revoked part is `summary.revoked_total`.
    pub sent_to_admin: TokenAmount,
    /// On-chain balance as reported by the registry.
    pub balance: TokenAmount,
    pub counterparties: Vec<CounterpartyGroup>,
    /// Most recent first.
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

/// Build the history page of `entity`.
///
/// Fails with `NotAnEntity` when the account is not in the registry.
pub fn entity_history<S>(source: &S, entity: &AccountId) -> Result<EntityHistory, ViewError>
where
    S: LedgerSource + ?Sized,
{
    let details = require_entity(source, entity)?;

    let validated = fetch_records(source, entity)?;
    let mut records = validated.records;

    let summary = summarize(&records, entity, RoleHint::Entity);
    let counterparties = group_by_counterparty(&records, entity).into_groups();
    sort_most_recent_first(&mut records);

    let sent_to_users = summary.sent_as(TxKind::EntityToUser);
    let sent_to_admin =
        summary.sent_as(TxKind::EntityToAdmin) + &summary.sent_as(TxKind::EntityToAdminRevoke);

    Ok(EntityHistory {
        entity: *entity,
        name: details.name,
        sent_to_users,
        sent_to_admin,
        balance: details.balance,
        counterparties,
        records,
        skipped: validated.skipped.len(),
        summary,
    })
}

/// Render `entity`'s full history as CSV, most recent first like the page.
///
/// Unlike the page view this does not skip malformed records: the export
/// fails instead of silently dropping rows. Error indices refer to ledger
/// order.
pub fn entity_history_csv<S>(source: &S, entity: &AccountId, options: &CsvOptions) -> Result<String, ViewError>
where
    S: LedgerSource + ?Sized,
{
    let details = require_entity(source, entity)?;

    let mut records = coerce_records(&source.transactions(entity)?)?;
    sort_most_recent_first(&mut records);
    let csv = export_csv_with(&records, options)?;

    tracing::debug!(
        entity = %entity.short(),
        name = %details.name,
        rows = records.len(),
        "entity history exported"
    );

    Ok(csv)
}
