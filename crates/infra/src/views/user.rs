use serde::Serialize;

use ntt_auth::RoleHint;
use ntt_core::{AccountId, SignedAmount, TokenAmount};
use ntt_ledger::summarize;

use super::{entity_name, fetch_records, ViewError};
use crate::source::LedgerSource;

/// What a user exchanged with one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedFromEntity {
    pub entity: AccountId,
    pub name: String,
    /// Entity → user payouts.
    pub received: TokenAmount,
    /// User → entity payments.
    pub paid: TokenAmount,
    pub net: SignedAmount,
}

/// Read model: the user dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDashboard {
    pub user: AccountId,
    /// Entities the user dealt with, in registry order.
    pub entities: Vec<ReceivedFromEntity>,
    pub total_received: TokenAmount,
    pub skipped: usize,
}

/// Build the dashboard of `user` across every registered entity.
pub fn user_dashboard<S>(source: &S, user: &AccountId) -> Result<UserDashboard, ViewError>
where
    S: LedgerSource + ?Sized,
{
    let mut rows = Vec::new();
    let mut total_received = TokenAmount::zero();
    let mut skipped = 0;

    for entity in source.entities()? {
        let validated = fetch_records(source, &entity)?;
        skipped += validated.skipped.len();

        // Each entity's history only holds its own transfers; anything else
        // in there would be credited to the wrong entity.
        let summary = summarize(&validated.records, user, RoleHint::User);
        let Some(totals) = summary.counterparties.get(&entity) else {
            continue;
        };

        total_received += &totals.received;
        rows.push(ReceivedFromEntity {
            entity,
            name: entity_name(source, &entity),
            received: totals.received.clone(),
            paid: totals.sent.clone(),
            net: totals.net.clone(),
        });
    }

    tracing::debug!(user = %user.short(), entities = rows.len(), skipped, "user dashboard assembled");

    Ok(UserDashboard {
        user: *user,
        entities: rows,
        total_received,
        skipped,
    })
}
