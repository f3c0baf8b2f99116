//! CSV export of transaction records.

use core::fmt::Write as _;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use thiserror::Error;

use crate::record::{MalformedRecordError, RawTransactionRecord, RecordField, TransactionRecord};

/// Header row of every export.
pub const CSV_HEADER: [&str; 5] = ["Type", "From", "To", "Amount", "Time"];

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("record {index}: missing field '{field}'")]
    MissingField { index: usize, field: RecordField },

    #[error("record {index}: {source}")]
    Uncoercible {
        index: usize,
        #[source]
        source: MalformedRecordError,
    },

    #[error("timestamp {0} is out of range")]
    Timestamp(u64),

    #[error("invalid time pattern {0:?}")]
    TimePattern(String),

    #[error("csv write failed: {0}")]
    Csv(String),
}

/// How the `Time` column is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `2023-11-14T22:13:20Z`
    #[default]
    Rfc3339,
    /// Raw seconds since the epoch.
    UnixSeconds,
    /// `strftime` pattern rendered at a fixed UTC offset, for exports meant to
    /// match a user's locale (`%m/%d/%Y, %I:%M:%S %p`).
    Pattern { pattern: String, offset: FixedOffset },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvOptions {
    pub time_format: TimeFormat,
}

/// Export with the default options (RFC 3339 UTC timestamps).
pub fn export_csv(records: &[TransactionRecord]) -> Result<String, FormatError> {
    export_csv_with(records, &CsvOptions::default())
}

/// Export records as `Type,From,To,Amount,Time`.
///
/// `Amount` uses the 18-decimal rendering. An empty input yields the header
/// line alone.
pub fn export_csv_with(records: &[TransactionRecord], options: &CsvOptions) -> Result<String, FormatError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for record in records {
        let from = record.from.to_string();
        let to = record.to.to_string();
        let amount = record.amount.format_units();
        let time = render_time(record.timestamp, &options.time_format)?;
        writer
            .write_record([record.kind.label(), from.as_str(), to.as_str(), amount.as_str(), time.as_str()])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormatError::Csv(e.to_string()))
}

/// Export records that have not been validated yet, in the order given.
///
/// Unlike the summary path, nothing is skipped here: a file with silently
/// dropped rows would misrepresent the ledger, so the first bad record fails
/// the export.
pub fn export_raw_csv(raw: &[RawTransactionRecord], options: &CsvOptions) -> Result<String, FormatError> {
    export_csv_with(&coerce_records(raw)?, options)
}

/// Convert every raw record or fail on the first one that does not convert.
///
/// The error carries the record's position in `raw`.
pub fn coerce_records(raw: &[RawTransactionRecord]) -> Result<Vec<TransactionRecord>, FormatError> {
    raw.iter()
        .enumerate()
        .map(|(index, r)| {
            TransactionRecord::try_from(r).map_err(|source| match source {
                MalformedRecordError::MissingField(field) => FormatError::MissingField { index, field },
                source => FormatError::Uncoercible { index, source },
            })
        })
        .collect()
}

fn render_time(timestamp: u64, format: &TimeFormat) -> Result<String, FormatError> {
    match format {
        TimeFormat::UnixSeconds => Ok(timestamp.to_string()),
        TimeFormat::Rfc3339 => Ok(to_datetime(timestamp)?.to_rfc3339_opts(SecondsFormat::Secs, true)),
        TimeFormat::Pattern { pattern, offset } => {
            let at = to_datetime(timestamp)?.with_timezone(offset);
            let mut out = String::new();
            write!(out, "{}", at.format(pattern)).map_err(|_| FormatError::TimePattern(pattern.clone()))?;
            Ok(out)
        }
    }
}

fn to_datetime(timestamp: u64) -> Result<DateTime<Utc>, FormatError> {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(FormatError::Timestamp(timestamp))
}

fn csv_error(e: csv::Error) -> FormatError {
    FormatError::Csv(e.to_string())
}
