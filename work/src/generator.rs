//! PoW generation (multi-threaded CPU).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;

use crate::{validator::work_value, WorkError};
use nano_mcp_types::{BlockHash, WorkNonce};

/// Generates proof-of-work for a root using all available CPU cores.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkGenerator;

/// Nonces each thread tries before checking whether another thread finished.
const BATCH_SIZE: u64 = 4096;

impl WorkGenerator {
    /// Generate a work nonce that meets the minimum difficulty.
    ///
    /// Splits the nonce space across all available CPU cores via rayon.
    /// The first thread to find a valid nonce signals the others to stop.
    pub fn generate(&self, root: &BlockHash, min_difficulty: u64) -> Result<WorkNonce, WorkError> {
        if min_difficulty == 0 {
            return Ok(WorkNonce(0));
        }

        let done = AtomicBool::new(false);
        let found = AtomicU64::new(0);
        let num_threads = rayon::current_num_threads().max(1) as u64;

        (0..num_threads).into_par_iter().for_each(|thread_id| {
            let mut nonce = thread_id;
            loop {
                if done.load(Ordering::Relaxed) {
                    return;
                }
                for _ in 0..BATCH_SIZE {
                    if work_value(root, nonce) >= min_difficulty {
                        if !done.swap(true, Ordering::AcqRel) {
                            found.store(nonce, Ordering::Release);
                        }
                        return;
                    }
                    nonce = match nonce.checked_add(num_threads) {
                        Some(next) => next,
                        None => return,
                    };
                }
            }
        });

        if done.load(Ordering::Acquire) {
            Ok(WorkNonce(found.load(Ordering::Acquire)))
        } else {
            Err(WorkError::Exhausted)
        }
    }
}
