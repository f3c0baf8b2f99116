//! Fixed-point token amounts.
//!
//! The contract stores balances as unbounded integers of base units with 18
//! implied decimal places. Amounts here keep that representation end to end;
//! the decimal rendering only happens at the edge (`format_units`).

use core::ops::{Add, AddAssign};
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Implied decimal places of the token.
pub const TOKEN_DECIMALS: u32 = 18;

/// Non-negative amount in base units.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Whole tokens, i.e. `tokens * 10^18` base units.
    pub fn from_tokens(tokens: u64) -> Self {
        Self(BigUint::from(tokens) * BigUint::from(10u8).pow(TOKEN_DECIMALS))
    }

    pub fn base_units(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a string of decimal base units (`"1500000000000000000"`).
    pub fn parse_base_units(s: &str) -> DomainResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_amount(format!(
                "{trimmed:?}: expected decimal base units"
            )));
        }
        BigUint::from_str(trimmed)
            .map(Self)
            .map_err(|e| DomainError::invalid_amount(format!("{trimmed:?}: {e}")))
    }

    /// Parse a human decimal string (`"1.5"`) into base units.
    pub fn parse_units(s: &str) -> DomainResult<Self> {
        let trimmed = s.trim();
        let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        if frac_part.len() > TOKEN_DECIMALS as usize {
            return Err(DomainError::invalid_amount(format!(
                "{trimmed:?}: more than {TOKEN_DECIMALS} decimal places"
            )));
        }

        let int_part = if int_part.is_empty() { "0" } else { int_part };
        let padded = format!("{int_part}{frac_part:0<width$}", width = TOKEN_DECIMALS as usize);
        Self::parse_base_units(&padded)
    }

    /// Render with 18 decimals: integer part, a dot, then the fraction without
    /// trailing zeros but never empty (`100.0`, `0.5`, `0.0`).
    pub fn format_units(&self) -> String {
        format_digits(&self.0.to_str_radix(10))
    }
}

impl core::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_units())
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl Add<&TokenAmount> for TokenAmount {
    type Output = TokenAmount;

    fn add(self, rhs: &TokenAmount) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl AddAssign<&TokenAmount> for TokenAmount {
    fn add_assign(&mut self, rhs: &TokenAmount) {
        self.0 += &rhs.0;
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_base_units(&raw).map_err(serde::de::Error::custom)
    }
}

/// Signed amount in base units, produced by differences (`net`).
///
/// Never clamped: a negative value is surfaced as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedAmount(BigInt);

impl SignedAmount {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// `lhs - rhs`, exact.
    pub fn difference(lhs: &TokenAmount, rhs: &TokenAmount) -> Self {
        let lhs = BigInt::from_biguint(Sign::Plus, lhs.0.clone());
        let rhs = BigInt::from_biguint(Sign::Plus, rhs.0.clone());
        Self(lhs - rhs)
    }

    pub fn base_units(&self) -> &BigInt {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn format_units(&self) -> String {
        let digits = format_digits(&self.0.magnitude().to_str_radix(10));
        if self.is_negative() {
            format!("-{digits}")
        } else {
            digits
        }
    }
}

impl core::fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_units())
    }
}

impl From<TokenAmount> for SignedAmount {
    fn from(value: TokenAmount) -> Self {
        Self(BigInt::from_biguint(Sign::Plus, value.0))
    }
}

impl Serialize for SignedAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SignedAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BigInt::from_str(raw.trim())
            .map(Self)
            .map_err(|e| serde::de::Error::custom(DomainError::invalid_amount(format!("{raw:?}: {e}"))))
    }
}

/// Split an unsigned decimal digit string at the implied decimal point.
fn format_digits(digits: &str) -> String {
    let decimals = TOKEN_DECIMALS as usize;
    let padded = if digits.len() <= decimals {
        format!("{digits:0>width$}", width = decimals + 1)
    } else {
        digits.to_string()
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    format!("{int_part}.{frac_part}")
}
