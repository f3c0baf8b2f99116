//! Startup configuration, read once from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

use ntt_ledger::{CsvOptions, TimeFormat};

pub const BIND_ADDR_VAR: &str = "NTT_BIND_ADDR";
pub const SNAPSHOT_PATH_VAR: &str = "NTT_SNAPSHOT_PATH";
pub const TIME_FORMAT_VAR: &str = "NTT_TIME_FORMAT";
pub const UTC_OFFSET_VAR: &str = "NTT_UTC_OFFSET_MINUTES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub snapshot_path: PathBuf,
    pub csv: CsvOptions,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                reason: e.to_string(),
            })?,
            None => {
                tracing::info!(default = DEFAULT_BIND_ADDR, "{BIND_ADDR_VAR} not set; using default");
                SocketAddr::from(([0, 0, 0, 0], 8080))
            }
        };

        let snapshot_path = lookup(SNAPSHOT_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(SNAPSHOT_PATH_VAR))?;

        let offset = match lookup(UTC_OFFSET_VAR) {
            Some(raw) => parse_offset(&raw)?,
            None => utc(),
        };

        let time_format = match lookup(TIME_FORMAT_VAR) {
            Some(pattern) => {
                check_pattern(&pattern)?;
                TimeFormat::Pattern { pattern, offset }
            }
            None => {
                if offset != utc() {
                    tracing::warn!("{UTC_OFFSET_VAR} has no effect without {TIME_FORMAT_VAR}");
                }
                TimeFormat::Rfc3339
            }
        };

        Ok(Self {
            bind_addr,
            snapshot_path,
            csv: CsvOptions { time_format },
        })
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { var: UTC_OFFSET_VAR, reason };

    let minutes: i32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| invalid(format!("{minutes} minutes is out of range")))
}

fn check_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::Invalid {
            var: TIME_FORMAT_VAR,
            reason: format!("{pattern:?} is not a valid strftime pattern"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ApiConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn snapshot_path_is_required() {
        assert_eq!(config(&[]), Err(ConfigError::Missing(SNAPSHOT_PATH_VAR)));
        assert_eq!(config(&[(SNAPSHOT_PATH_VAR, "  ")]), Err(ConfigError::Missing(SNAPSHOT_PATH_VAR)));
    }

    #[test]
    fn defaults() {
        let cfg = config(&[(SNAPSHOT_PATH_VAR, "ledger.json")]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.snapshot_path, PathBuf::from("ledger.json"));
        assert_eq!(cfg.csv.time_format, TimeFormat::Rfc3339);
    }

    #[test]
    fn pattern_with_offset() {
        let cfg = config(&[
            (SNAPSHOT_PATH_VAR, "ledger.json"),
            (TIME_FORMAT_VAR, "%m/%d/%Y, %I:%M:%S %p"),
            (UTC_OFFSET_VAR, "-300"),
        ])
        .unwrap();

        match cfg.csv.time_format {
            TimeFormat::Pattern { pattern, offset } => {
                assert_eq!(pattern, "%m/%d/%Y, %I:%M:%S %p");
                assert_eq!(offset.local_minus_utc(), -300 * 60);
            }
            other => panic!("unexpected time format: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[(SNAPSHOT_PATH_VAR, "x"), (BIND_ADDR_VAR, "nowhere")]),
            Err(ConfigError::Invalid { var: BIND_ADDR_VAR, .. })
        ));
        assert!(matches!(
            config(&[(SNAPSHOT_PATH_VAR, "x"), (UTC_OFFSET_VAR, "100000")]),
            Err(ConfigError::Invalid { var: UTC_OFFSET_VAR, .. })
        ));
        assert!(matches!(
            config(&[(SNAPSHOT_PATH_VAR, "x"), (TIME_FORMAT_VAR, "%Q")]),
            Err(ConfigError::Invalid { var: TIME_FORMAT_VAR, .. })
        ));
    }
}
