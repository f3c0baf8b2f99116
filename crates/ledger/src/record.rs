//! Transaction records as fetched from the ledger source.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use ntt_core::{AccountId, TokenAmount};

use crate::kind::TxKind;

/// Field of a transaction record, named as the contract names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Kind,
    From,
    To,
    Amount,
    Timestamp,
}

impl core::fmt::Display for RecordField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            RecordField::Kind => "txType",
            RecordField::From => "from",
            RecordField::To => "to",
            RecordField::Amount => "amount",
            RecordField::Timestamp => "timestamp",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRecordError {
    #[error("missing field '{0}'")]
    MissingField(RecordField),

    #[error("unknown transaction kind {0:?}")]
    UnknownKind(String),

    #[error("invalid account in '{field}': {reason}")]
    InvalidAccount { field: RecordField, reason: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),
}

/// Wire shape of a ledger record. Every field may be absent; nothing has been
/// checked yet.
///
/// Every field accepts any JSON scalar: providers encode big integers both
/// as numbers and as decimal strings, and a wrongly typed field must fail
/// validation of its record, not parsing of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRecord {
    #[serde(rename = "txType", default, deserialize_with = "scalar_as_text")]
    pub tx_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub timestamp: Option<String>,
}

/// A validated ledger record (immutable once fetched).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "txType")]
    pub kind: TxKind,
    pub from: AccountId,
    pub to: AccountId,
    /// Base units (18 implied decimals).
    pub amount: TokenAmount,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl TransactionRecord {
    pub fn new(
        kind: TxKind,
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
        timestamp: u64,
    ) -> Self {
        Self {
            kind,
            from,
            to,
            amount,
            timestamp,
        }
    }

    pub fn involves(&self, account: &AccountId) -> bool {
        self.from == *account || self.to == *account
    }

    /// The other side of this record as seen from `viewpoint`.
    ///
    /// `None` when the viewpoint is on neither side. A self-transfer yields
    /// the viewpoint itself.
    pub fn counterparty_of(&self, viewpoint: &AccountId) -> Option<AccountId> {
        if self.from == *viewpoint {
            Some(self.to)
        } else if self.to == *viewpoint {
            Some(self.from)
        } else {
            None
        }
    }
}

impl TryFrom<&RawTransactionRecord> for TransactionRecord {
    type Error = MalformedRecordError;

    fn try_from(raw: &RawTransactionRecord) -> Result<Self, Self::Error> {
        let kind: TxKind = required(&raw.tx_type, RecordField::Kind)?.parse()?;
        let from = parse_account(&raw.from, RecordField::From)?;
        let to = parse_account(&raw.to, RecordField::To)?;

        let amount = required(&raw.amount, RecordField::Amount)?;
        let amount = TokenAmount::parse_base_units(amount)
            .map_err(|e| MalformedRecordError::InvalidAmount(e.to_string()))?;

        let timestamp = required(&raw.timestamp, RecordField::Timestamp)?;
        let timestamp = timestamp
            .trim()
            .parse::<u64>()
            .map_err(|_| MalformedRecordError::InvalidTimestamp(timestamp.to_string()))?;

        Ok(Self {
            kind,
            from,
            to,
            amount,
            timestamp,
        })
    }
}

impl From<&TransactionRecord> for RawTransactionRecord {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            tx_type: Some(record.kind.label().to_string()),
            from: Some(record.from.to_string()),
            to: Some(record.to.to_string()),
            amount: Some(record.amount.base_units().to_string()),
            timestamp: Some(record.timestamp.to_string()),
        }
    }
}

/// A record that failed validation, with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub error: MalformedRecordError,
}

/// Outcome of validating a batch: the usable records plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRecords {
    pub records: Vec<TransactionRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl ValidatedRecords {
    /// True when some input had to be dropped (partial result).
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Validate a batch of raw records, skipping the malformed ones.
///
/// Input order is preserved for the records that survive.
pub fn validate_records<'a, I>(raw: I) -> ValidatedRecords
where
    I: IntoIterator<Item = &'a RawTransactionRecord>,
{
    let mut out = ValidatedRecords::default();

    for (index, raw) in raw.into_iter().enumerate() {
        match TransactionRecord::try_from(raw) {
            Ok(record) => out.records.push(record),
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed ledger record");
                out.skipped.push(SkippedRecord { index, error });
            }
        }
    }

    out
}

fn required(value: &Option<String>, field: RecordField) -> Result<&str, MalformedRecordError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MalformedRecordError::MissingField(field)),
    }
}

fn parse_account(value: &Option<String>, field: RecordField) -> Result<AccountId, MalformedRecordError> {
    required(value, field)?
        .parse()
        .map_err(|e: ntt_core::DomainError| MalformedRecordError::InvalidAccount {
            field,
            reason: e.to_string(),
        })
}

/// Read any JSON scalar as text.
///
/// Numbers keep their exact digits (serde_json's `arbitrary_precision`), so
/// amounts beyond `u64` survive. Anything else that is not a string (bools,
/// numbers in address fields, nested values) is kept as its JSON text and
/// rejected later by validation, for that record alone.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTITY: &str = "0x00000000000000000000000000000000000000e1";
    const USER: &str = "0x00000000000000000000000000000000000000A1";

    fn raw(tx_type: &str, amount: &str, timestamp: &str) -> RawTransactionRecord {
        RawTransactionRecord {
            tx_type: Some(tx_type.to_string()),
            from: Some(ENTITY.to_string()),
            to: Some(USER.to_string()),
            amount: Some(amount.to_string()),
            timestamp: Some(timestamp.to_string()),
        }
    }

    #[test]
    fn validates_well_formed_record() {
        let record = TransactionRecord::try_from(&raw("nttToUser", "30", "1700000000")).unwrap();
        assert_eq!(record.kind, TxKind::EntityToUser);
        assert_eq!(record.to, USER.parse().unwrap());
        assert_eq!(record.amount, TokenAmount::from(30u64));
        assert_eq!(record.timestamp, 1_700_000_000);
    }

    #[test]
    fn reports_each_missing_field() {
        let mut r = raw("nttToUser", "30", "1");
        r.tx_type = None;
        assert_eq!(
            TransactionRecord::try_from(&r),
            Err(MalformedRecordError::MissingField(RecordField::Kind))
        );

        let mut r = raw("nttToUser", "30", "1");
        r.to = Some("  ".to_string());
        assert_eq!(
            TransactionRecord::try_from(&r),
            Err(MalformedRecordError::MissingField(RecordField::To))
        );

        let mut r = raw("nttToUser", "30", "1");
        r.timestamp = None;
        assert_eq!(
            TransactionRecord::try_from(&r),
            Err(MalformedRecordError::MissingField(RecordField::Timestamp))
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            TransactionRecord::try_from(&raw("nttToUser", "-3", "1")),
            Err(MalformedRecordError::InvalidAmount(_))
        ));
        assert!(matches!(
            TransactionRecord::try_from(&raw("nttToUser", "3", "yesterday")),
            Err(MalformedRecordError::InvalidTimestamp(_))
        ));

        let mut r = raw("nttToUser", "3", "1");
        r.from = Some("0xnope".to_string());
        assert!(matches!(
            TransactionRecord::try_from(&r),
            Err(MalformedRecordError::InvalidAccount { field: RecordField::From, .. })
        ));
    }

    #[test]
    fn validate_records_skips_and_keeps_order() {
        let mut broken = raw("nttToUser", "2", "2");
        broken.amount = None;
        let batch = vec![
            raw("nttToUser", "1", "1"),
            broken,
            raw("userToNTT", "3", "3"),
            raw("mystery", "4", "4"),
        ];

        let validated = validate_records(&batch);
        assert!(validated.is_partial());
        assert_eq!(validated.records.len(), 2);
        assert_eq!(validated.records[0].timestamp, 1);
        assert_eq!(validated.records[1].timestamp, 3);
        assert_eq!(
            validated.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn deserializes_numbers_or_strings() {
        let json = format!(
            r#"{{"txType":"userToNTT","from":"{USER}","to":"{ENTITY}","amount":"1000000000000000000000000000000","timestamp":1700000000}}"#
        );
        let raw: RawTransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.timestamp.as_deref(), Some("1700000000"));

        let record = TransactionRecord::try_from(&raw).unwrap();
        assert_eq!(record.amount.format_units(), "1000000000000.0");

        let sparse: RawTransactionRecord = serde_json::from_str(r#"{"txType":"nttToUser","amount":null}"#).unwrap();
        assert_eq!(sparse.amount, None);
        assert_eq!(sparse.from, None);
    }

    #[test]
    fn numeric_amounts_beyond_u64_keep_every_digit() {
        let json = format!(
            r#"{{"txType":"adminToNTT","from":"{USER}","to":"{ENTITY}","amount":100000000000000000000,"timestamp":1}}"#
        );
        let raw: RawTransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.amount.as_deref(), Some("100000000000000000000"));

        let record = TransactionRecord::try_from(&raw).unwrap();
        assert_eq!(record.amount, TokenAmount::from_tokens(100));
    }

    #[test]
    fn wrongly_typed_fields_fail_only_their_record() {
        let json = format!(
            r#"[
                {{"txType":"nttToUser","from":5,"to":"{USER}","amount":"1","timestamp":1}},
                {{"txType":true,"from":"{ENTITY}","to":"{USER}","amount":"1","timestamp":2}},
                {{"txType":"nttToUser","from":"{ENTITY}","to":"{USER}","amount":1.5,"timestamp":3}},
                {{"txType":"nttToUser","from":"{ENTITY}","to":"{USER}","amount":"7","timestamp":4}}
            ]"#
        );
        let batch: Vec<RawTransactionRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(batch[0].from.as_deref(), Some("5"));

        let validated = validate_records(&batch);
        assert_eq!(validated.records.len(), 1);
        assert_eq!(validated.records[0].timestamp, 4);

        let errors: Vec<&MalformedRecordError> = validated.skipped.iter().map(|s| &s.error).collect();
        assert!(matches!(errors[0], MalformedRecordError::InvalidAccount { field: RecordField::From, .. }));
        assert!(matches!(errors[1], MalformedRecordError::UnknownKind(_)));
        assert!(matches!(errors[2], MalformedRecordError::InvalidAmount(_)));
    }

    #[test]
    fn counterparty_is_the_other_side() {
        let record = TransactionRecord::try_from(&raw("nttToUser", "1", "1")).unwrap();
        let entity: AccountId = ENTITY.parse().unwrap();
        let user: AccountId = USER.parse().unwrap();
        let stranger = AccountId::from_bytes([9; 20]);

        assert_eq!(record.counterparty_of(&entity), Some(user));
        assert_eq!(record.counterparty_of(&user), Some(entity));
        assert_eq!(record.counterparty_of(&stranger), None);
    }
}
