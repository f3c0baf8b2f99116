//! `ntt-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! account identifiers as the token contract hands them out, fixed-point token
//! amounts, and the shared error model.

pub mod account;
pub mod amount;
pub mod error;

pub use account::AccountId;
pub use amount::{SignedAmount, TokenAmount, TOKEN_DECIMALS};
pub use error::{DomainError, DomainResult};
