use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("work difficulty {actual:016x} below minimum {minimum:016x}")]
    InsufficientDifficulty { actual: u64, minimum: u64 },

    #[error("invalid difficulty {0:?}: expected up to 16 hex characters")]
    InvalidDifficulty(String),

    #[error("work generation exhausted the nonce space")]
    Exhausted,
}
