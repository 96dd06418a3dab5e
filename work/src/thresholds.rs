//! Block-kind-aware PoW difficulty thresholds.
//!
//! Two thresholds are in play:
//! - **open**: the first block of an account, whose work root is the
//!   account's public key
//! - **secured**: every block that follows an existing frontier (receive,
//!   send), whose work root is that frontier
//!
//! Both values are ledger-defined and carried as configuration.

use nano_mcp_types::{BlockHash, PublicKey};

use crate::WorkError;

/// Threshold for open blocks.
pub const DEFAULT_OPEN_THRESHOLD: u64 = 0xFFFFFE00_00000000;
/// Threshold for blocks chained onto an existing frontier.
pub const DEFAULT_SECURED_THRESHOLD: u64 = 0xFFFFFFF8_00000000;

/// Simplified block kind for PoW threshold selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkBlockKind {
    /// Account has no frontier yet.
    Open,
    /// A prior block already secures the chain.
    Secured,
}

/// What to ask a work source for: a root and the difficulty it must clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkRequest {
    pub root: BlockHash,
    pub difficulty: u64,
    pub kind: WorkBlockKind,
}

/// Per-block-kind PoW thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkThresholds {
    pub open: u64,
    pub secured: u64,
}

impl WorkThresholds {
    pub fn new() -> Self {
        Self {
            open: DEFAULT_OPEN_THRESHOLD,
            secured: DEFAULT_SECURED_THRESHOLD,
        }
    }

    /// Construct with custom values (useful in tests or low-difficulty devnets).
    pub fn with_values(open: u64, secured: u64) -> Self {
        Self { open, secured }
    }

    /// Get the required work difficulty for a specific block kind.
    pub fn threshold_for(&self, kind: WorkBlockKind) -> u64 {
        match kind {
            WorkBlockKind::Open => self.open,
            WorkBlockKind::Secured => self.secured,
        }
    }

    /// Pick the work root and difficulty for the next block of an account.
    ///
    /// A zero frontier means the account is unopened: work is computed over
    /// its public key at the open threshold. Otherwise it is computed over the
    /// frontier at the secured threshold.
    pub fn select(&self, frontier: &BlockHash, public_key: &PublicKey) -> WorkRequest {
        let (root, kind) = if frontier.is_zero() {
            (BlockHash::new(public_key.0), WorkBlockKind::Open)
        } else {
            (*frontier, WorkBlockKind::Secured)
        };
        WorkRequest {
            root,
            difficulty: self.threshold_for(kind),
            kind,
        }
    }
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a difficulty given as hex (`"fffffff800000000"`, optional `0x`).
pub fn parse_difficulty(s: &str) -> Result<u64, WorkError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() || digits.len() > 16 {
        return Err(WorkError::InvalidDifficulty(s.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| WorkError::InvalidDifficulty(s.to_string()))
}

/// Render a difficulty the way the node expects it in `work_generate`.
pub fn format_difficulty(difficulty: u64) -> String {
    format!("{difficulty:016x}")
}
