//! Errors raised while parsing or converting ledger values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid hex for {what}: expected {expected} hex characters")]
    InvalidHex { what: &'static str, expected: usize },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount has more than {max} fractional digits")]
    TooPrecise { max: usize },

    #[error("amount {0} does not fit in a 128-bit balance field")]
    BalanceOverflow(String),

    #[error("invalid work value: {0}")]
    InvalidWork(String),
}
