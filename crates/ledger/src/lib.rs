//! Ledger reconciliation and aggregation over the token contract's
//! transaction history.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Every
//! operation takes a freshly fetched snapshot of records and returns plain
//! data; nothing is cached between calls.

pub mod classify;
pub mod export;
pub mod grouping;
pub mod kind;
pub mod record;
pub mod summary;

pub use classify::{classify, Flow};
pub use export::{coerce_records, export_csv, export_csv_with, export_raw_csv, CsvOptions, FormatError, TimeFormat, CSV_HEADER};
pub use grouping::{group_by_counterparty, sort_most_recent_first, CounterpartyGroup, CounterpartyGroups};
pub use kind::TxKind;
pub use record::{
    validate_records, MalformedRecordError, RawTransactionRecord, RecordField, SkippedRecord,
    TransactionRecord, ValidatedRecords,
};
pub use summary::{summarize, AggregateSummary, CounterpartyTotals};

pub use ntt_auth::RoleHint;
