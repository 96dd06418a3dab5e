//! Gateway error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("node returned HTTP {status}")]
    Http { status: u16 },

    /// The node answered with an `error` field; the message is verbatim.
    #[error("{0}")]
    Node(String),

    #[error("invalid {action} response: {reason}")]
    InvalidResponse { action: String, reason: String },
}

impl GatewayError {
    pub(crate) fn invalid(action: &str, reason: impl Into<String>) -> Self {
        GatewayError::InvalidResponse {
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the node reported that the account has no blocks.
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, GatewayError::Node(message)
            if message.to_ascii_lowercase().contains("account not found"))
    }
}
