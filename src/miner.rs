//! Proof-of-work sealing
//!
//! Sealing searches nonces from zero upward until the block digest starts with
//! `difficulty` hex zeros. The search is unbounded and blocks the calling
//! thread; expect about `16^difficulty` attempts, so keep test difficulties at
//! 4 or below.

use crate::blockchain::{meets_difficulty, CandidateBlock};
use std::time::Instant;
use tracing::debug;

/// Resets the nonce to 0 and increments it until the digest satisfies
/// `difficulty`. Returns the winning digest; `candidate.nonce` is left at the
/// winning value. `candidate.hash` is not updated, the ledger assigns it on
/// append.
pub fn seal(candidate: &mut CandidateBlock, difficulty: u32) -> String {
    let started = Instant::now();
    candidate.nonce = 0;
    let mut digest = candidate.recompute();
    while !meets_difficulty(&digest, difficulty) {
        candidate.nonce += 1;
        digest = candidate.recompute();
    }
    debug!(
        index = candidate.index,
        nonce = candidate.nonce,
        attempts = candidate.nonce + 1,
        expected_attempts = expected_attempts(difficulty),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sealed block"
    );
    digest
}

/// Mean number of digests the search evaluates at `difficulty`.
pub fn expected_attempts(difficulty: u32) -> f64 {
    16f64.powf(f64::from(difficulty))
}
