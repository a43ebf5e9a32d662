//! Candidate and sealed block types

use crate::codec::{BlockFields, Transaction};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Milliseconds since the Unix epoch, as stamped on new blocks.
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// A block under construction. Its nonce and hash may change freely while
/// sealing; once appended to a ledger it becomes an immutable [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateBlock {
    pub index: u64,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub nonce: u64,
    pub hash: String,
}

impl CandidateBlock {
    /// Builds a candidate with nonce 0 and its initial digest.
    pub fn new(
        index: u64,
        timestamp: u64,
        transactions: Vec<Transaction>,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut block = CandidateBlock {
            index,
            timestamp,
            transactions,
            previous_hash: previous_hash.into(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.recompute();
        block
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self.hash = self.recompute();
        self
    }

    pub fn fields(&self) -> BlockFields<'_> {
        BlockFields {
            index: self.index,
            timestamp: self.timestamp,
            transactions: &self.transactions,
            previous_hash: &self.previous_hash,
            nonce: self.nonce,
        }
    }

    /// Digest of the current field values. Does not touch `self.hash`.
    pub fn recompute(&self) -> String {
        self.fields().digest()
    }

    pub(crate) fn into_sealed(self, hash: String) -> Block {
        Block {
            index: self.index,
            timestamp: self.timestamp,
            transactions: self.transactions,
            previous_hash: self.previous_hash,
            nonce: self.nonce,
            hash,
        }
    }
}

/// A sealed block with a fixed nonce and hash. Fields are read-only.
///
/// Blocks inside a [`Blockchain`](crate::blockchain::Blockchain) passed
/// validation on append; a block returned by a rejected
/// [`submit`](crate::blockchain::Blockchain::submit) did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    index: u64,
    timestamp: u64,
    transactions: Vec<Transaction>,
    previous_hash: String,
    nonce: u64,
    hash: String,
}

impl Block {
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Block timestamp as a UTC date-time, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp as i64).single()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    pub fn fields(&self) -> BlockFields<'_> {
        BlockFields {
            index: self.index,
            timestamp: self.timestamp,
            transactions: &self.transactions,
            previous_hash: &self.previous_hash,
            nonce: self.nonce,
        }
    }

    pub fn recompute(&self) -> String {
        self.fields().digest()
    }

    /// Reopens the block as a candidate, e.g. to re-seal a copy.
    pub fn to_candidate(&self) -> CandidateBlock {
        CandidateBlock {
            index: self.index,
            timestamp: self.timestamp,
            transactions: self.transactions.clone(),
            previous_hash: self.previous_hash.clone(),
            nonce: self.nonce,
            hash: self.hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn genesis_tx() -> Transaction {
        let mut tx = Transaction::new();
        tx.insert("system".to_string(), Value::String("genesis".to_string()));
        tx
    }

    #[test]
    fn test_new_candidate_computes_hash() {
        let block = CandidateBlock::new(0, 1672531200000, vec![genesis_tx()], GENESIS_PREVIOUS_HASH);
        assert_eq!(block.nonce, 0);
        assert_eq!(
            block.hash,
            "c4e2b47ed8d5db9ed4018997334bea8b4b32fe74c2d86bf9ff42600da320c650"
        );
    }

    #[test]
    fn test_recompute_does_not_mutate() {
        let mut block = CandidateBlock::new(1, 10, vec![genesis_tx()], "abc");
        let original = block.hash.clone();
        block.nonce = 42;
        let recomputed = block.recompute();
        assert_ne!(recomputed, original);
        assert_eq!(block.hash, original);
    }

    #[test]
    fn test_with_nonce_refreshes_hash() {
        let block = CandidateBlock::new(1, 10, vec![], "abc").with_nonce(7);
        assert_eq!(block.nonce, 7);
        assert_eq!(block.hash, block.recompute());
    }

    #[test]
    fn test_sealed_block_keeps_fields() {
        let candidate = CandidateBlock::new(3, 99, vec![genesis_tx()], "prev").with_nonce(5);
        let hash = candidate.recompute();
        let sealed = candidate.clone().into_sealed(hash.clone());
        assert_eq!(sealed.index(), 3);
        assert_eq!(sealed.timestamp(), 99);
        assert_eq!(sealed.previous_hash(), "prev");
        assert_eq!(sealed.nonce(), 5);
        assert_eq!(sealed.hash(), hash);
        assert_eq!(sealed.recompute(), hash);
        assert_eq!(sealed.to_candidate(), candidate);
    }

    #[test]
    fn test_datetime_from_millis() {
        let sealed = CandidateBlock::new(0, 1672531200000, vec![], "0").into_sealed(String::new());
        let dt = sealed.datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }
}
