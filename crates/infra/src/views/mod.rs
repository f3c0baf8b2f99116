//! Dashboard views (admin, entity, user) built from a fresh ledger read.
//!
//! Each view re-reads everything it needs from the source, validates the raw
//! records (skipping malformed ones and reporting how many were dropped) and
//! hands the result to the aggregation engine. Nothing is cached.

pub mod admin;
pub mod entity;
pub mod user;

use thiserror::Error;

use ntt_auth::AuthzError;
use ntt_core::AccountId;
use ntt_ledger::{validate_records, FormatError, ValidatedRecords};

use crate::source::{EntityDetails, LedgerSource, SourceError};

pub use admin::{admin_dashboard, AdminDashboard, EntityListing};
pub use entity::{entity_history, entity_history_csv, EntityHistory};
pub use user::{user_dashboard, ReceivedFromEntity, UserDashboard};

/// Display name used when the registry has no details for an entity.
pub const UNKNOWN_ENTITY_NAME: &str = "Unknown NTT";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("access denied: {0}")]
    AccessDenied(#[from] AuthzError),

    #[error("{0} is not a registered entity")]
    NotAnEntity(AccountId),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Registry details of `entity`, or `NotAnEntity` when it has none.
///
/// The one registration check every per-entity view goes through.
fn require_entity<S>(source: &S, entity: &AccountId) -> Result<EntityDetails, ViewError>
where
    S: LedgerSource + ?Sized,
{
    source
        .entity_details(entity)?
        .ok_or(ViewError::NotAnEntity(*entity))
}

/// Fetch and validate one entity's history.
fn fetch_records<S>(source: &S, entity: &AccountId) -> Result<ValidatedRecords, SourceError>
where
    S: LedgerSource + ?Sized,
{
    let raw = source.transactions(entity)?;
    let validated = validate_records(&raw);
    if validated.is_partial() {
        tracing::warn!(
            entity = %entity.short(),
            skipped = validated.skipped.len(),
            total = raw.len(),
            "partial ledger history"
        );
    }
    Ok(validated)
}

/// Registry name of `entity`, falling back to [`UNKNOWN_ENTITY_NAME`].
fn entity_name<S>(source: &S, entity: &AccountId) -> String
where
    S: LedgerSource + ?Sized,
{
    match source.entity_details(entity) {
        Ok(Some(details)) => details.name,
        Ok(None) => UNKNOWN_ENTITY_NAME.to_string(),
        Err(e) => {
            tracing::warn!(entity = %entity.short(), error = %e, "failed to fetch entity name");
            UNKNOWN_ENTITY_NAME.to_string()
        }
    }
}
