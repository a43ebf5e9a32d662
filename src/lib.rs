//! TicketChain - A single-writer proof-of-work ledger for ticket issuance
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`codec`] - Canonical block serialization and SHA-256 digests
//! - [`blockchain`] - Candidate and sealed blocks, chain management and validation
//! - [`miner`] - Proof-of-work sealing
//! - [`shared`] - Lock-guarded ledger handle for concurrent miners
//!
//! ## Tickets
//! - [`ticket`] - Ticket records and issuance
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - Terminal rendering for receipts and the explorer

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod codec;
pub mod miner;
pub mod shared;

// ============================================================================
// Tickets
// ============================================================================
pub mod ticket;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;

pub use blockchain::{Block, Blockchain, CandidateBlock, MineOutcome};
pub use error::{ChainError, Result};
pub use shared::SharedLedger;
pub use ticket::{issue_ticket, Ticket, TicketReceipt};

/// Creates a ledger with the given difficulty and its genesis block.
pub fn new_ledger(difficulty: u32) -> Blockchain {
    Blockchain::new(difficulty)
}

/// Read-only traversal of the ledger, genesis first.
pub fn inspect_chain(chain: &Blockchain) -> &[Block] {
    chain.inspect_chain()
}
