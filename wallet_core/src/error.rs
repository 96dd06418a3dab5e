use nano_mcp_crypto::CryptoError;
use nano_mcp_gateway::GatewayError;
use nano_mcp_types::{RawAmount, TypesError};
use nano_mcp_work::WorkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("private key does not belong to {0}")]
    KeyMismatch(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("account has no previous blocks")]
    NoPreviousBlocks,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        needed: RawAmount,
        available: RawAmount,
    },

    #[error("signing error: {0}")]
    Signing(String),

    #[error("work error: {0}")]
    Work(#[from] WorkError),

    /// Transport, HTTP, or ledger-reported failure. Ledger messages are
    /// rendered verbatim.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Other(String),
}

impl WalletError {
    /// Whether the error was detected from the caller's input alone, before
    /// any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidAddress(_)
                | WalletError::Key(_)
                | WalletError::KeyMismatch(_)
                | WalletError::InvalidAmount(_)
        )
    }
}

impl From<CryptoError> for WalletError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidAddress(address) => WalletError::InvalidAddress(address),
            CryptoError::Types(inner) => inner.into(),
        }
    }
}

impl From<TypesError> for WalletError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidAddress(address) => WalletError::InvalidAddress(address),
            TypesError::InvalidHex { .. } => WalletError::Key(err.to_string()),
            TypesError::InvalidAmount(amount) => WalletError::InvalidAmount(amount),
            TypesError::TooPrecise { .. } => WalletError::InvalidAmount(err.to_string()),
            TypesError::BalanceOverflow(_) => WalletError::Signing(err.to_string()),
            TypesError::InvalidWork(_) => WalletError::Other(err.to_string()),
        }
    }
}
