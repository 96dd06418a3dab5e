use nano_mcp_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Types(#[from] TypesError),
}
