//! Infrastructure layer: the ledger source seam and the dashboard views
//! assembled on top of the aggregation engine.
//!
//! The token contract stays a black box behind `LedgerSource`; every view is
//! a full re-read of it followed by pure computation.

pub mod source;
pub mod views;

pub use source::{EntityDetails, InMemoryLedgerSource, LedgerSnapshot, LedgerSource, SourceError};
pub use views::{
    admin_dashboard, entity_history, entity_history_csv, user_dashboard, AdminDashboard,
    EntityHistory, EntityListing, ReceivedFromEntity, UserDashboard, ViewError,
    UNKNOWN_ENTITY_NAME,
};
