use serde::Serialize;

use ntt_auth::{require_role, Role, RoleHint};
use ntt_core::{AccountId, TokenAmount};
use ntt_ledger::summarize;

use super::{fetch_records, ViewError, UNKNOWN_ENTITY_NAME};
use crate::source::LedgerSource;

/// One row of the admin's entity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityListing {
    pub address: AccountId,
    pub name: String,
    pub physical_address: String,
    pub balance: TokenAmount,
}

/// Read model: what the admin dashboard shows.
///
/// Tracks:
/// - `minted_total`: everything credited to entities
/// - `revoked_total`: everything pulled back on entity removal
/// - `returned_total`: everything entities refunded voluntarily
/// - `entities`: the registry with current balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminDashboard {
    pub minted_total: TokenAmount,
    pub revoked_total: TokenAmount,
    pub returned_total: TokenAmount,
    pub entities: Vec<EntityListing>,
    /// Malformed records left out of the totals.
    pub skipped: usize,
}

/// Build the admin dashboard for `caller`.
///
/// Requires `ADMIN_ROLE`. Totals cover every entity's history.
pub fn admin_dashboard<S>(source: &S, caller: &AccountId) -> Result<AdminDashboard, ViewError>
where
    S: LedgerSource + ?Sized,
{
    require_role(source, &Role::ADMIN, caller)?;

    let entities = source.entities()?;
    let mut records = Vec::new();
    let mut skipped = 0;
    let mut listings = Vec::with_capacity(entities.len());

    for entity in &entities {
        let validated = fetch_records(source, entity)?;
        skipped += validated.skipped.len();
        records.extend(validated.records);

        let listing = match source.entity_details(entity)? {
            Some(details) => EntityListing {
                address: *entity,
                name: details.name,
                physical_address: details.physical_address,
                balance: details.balance,
            },
            None => {
                tracing::warn!(entity = %entity.short(), "registered entity has no details");
                EntityListing {
                    address: *entity,
                    name: UNKNOWN_ENTITY_NAME.to_string(),
                    physical_address: String::new(),
                    balance: TokenAmount::zero(),
                }
            }
        };
        listings.push(listing);
    }

    let summary = summarize(&records, caller, RoleHint::Admin);

    tracing::debug!(
        entities = listings.len(),
        records = records.len(),
        skipped,
        "admin dashboard assembled"
    );

    Ok(AdminDashboard {
        minted_total: summary.minted_total,
        revoked_total: summary.revoked_total,
        returned_total: summary.returned_total,
        entities: listings,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::*;
    use ntt_auth::AuthzError;

    #[test]
    fn totals_cover_every_entity() {
        let dashboard = admin_dashboard(&source(), &ADMIN).unwrap();

        assert_eq!(dashboard.minted_total, tokens(300));
        assert_eq!(dashboard.revoked_total, tokens(50));
        assert_eq!(dashboard.returned_total, tokens(10));
        assert_eq!(dashboard.skipped, 1);
    }

    #[test]
    fn lists_entities_in_registry_order() {
        let dashboard = admin_dashboard(&source(), &ADMIN).unwrap();
        let names: Vec<&str> = dashboard.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bakery", "Clinic"]);
        assert_eq!(dashboard.entities[0].balance.format_units(), "130.0");
        assert_eq!(dashboard.entities[1].physical_address, "2 Care Road");
    }

    #[test]
    fn non_admin_is_denied() {
        let err = admin_dashboard(&source(), &ALICE).unwrap_err();
        assert!(matches!(err, ViewError::AccessDenied(AuthzError::Forbidden { .. })));
    }
}
