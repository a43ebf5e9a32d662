//! Append-only ledger: genesis, validation, append and mining

use crate::blockchain::core::block::{now_millis, Block, CandidateBlock, GENESIS_PREVIOUS_HASH};
use crate::blockchain::core::validation::{validate_linkage, validate_proof, validate_sealed};
use crate::codec::Transaction;
use crate::config::LedgerConfig;
use crate::error::ChainError;
use crate::miner::seal;
use serde_json::Value;
use tracing::{info, warn};

pub const DEFAULT_DIFFICULTY: u32 = 2;

/// The single transaction carried by every genesis block.
pub fn genesis_transaction() -> Transaction {
    let mut tx = Transaction::new();
    tx.insert("system".to_string(), Value::String("genesis".to_string()));
    tx
}

/// Result of [`Blockchain::mine_with_outcome`]: the sealed block and whether
/// the ledger accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineOutcome {
    pub block: Block,
    pub appended: bool,
}

/// Append-only chain of sealed blocks with a fixed difficulty.
///
/// A ledger is never empty: construction always appends the genesis block.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: u32,
}

impl Blockchain {
    /// Create a new ledger and its genesis block.
    pub fn new(difficulty: u32) -> Self {
        let genesis = Self::create_genesis_block();
        info!(difficulty, hash = %genesis.hash(), "created genesis block");
        Blockchain {
            blocks: vec![genesis],
            difficulty,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.difficulty)
    }

    // Genesis skips proof-of-work; its hash is the nonce-0 digest.
    fn create_genesis_block() -> Block {
        let candidate = CandidateBlock::new(
            0,
            now_millis(),
            vec![genesis_transaction()],
            GENESIS_PREVIOUS_HASH,
        );
        let hash = candidate.hash.clone();
        candidate.into_sealed(hash)
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// Most recently appended block.
    pub fn tail(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    /// Read-only view of every block, genesis first.
    pub fn inspect_chain(&self) -> &[Block] {
        &self.blocks
    }

    /// Unsealed block extending the current tail.
    pub fn candidate(&self, transactions: Vec<Transaction>) -> CandidateBlock {
        let tail = self.tail();
        CandidateBlock::new(tail.index() + 1, now_millis(), transactions, tail.hash())
    }

    /// Like [`validate`](Self::validate) but reports why a candidate is rejected.
    pub fn check(&self, candidate: &CandidateBlock, proof: &str) -> Result<(), ChainError> {
        validate_linkage(&candidate.previous_hash, self.tail().hash())?;
        validate_proof(candidate, proof, self.difficulty)
    }

    /// True iff the candidate links to the tail and `proof` is its digest
    /// with the required leading zeros.
    pub fn validate(&self, candidate: &CandidateBlock, proof: &str) -> bool {
        self.check(candidate, proof).is_ok()
    }

    /// Validates and appends. On error the chain is unchanged and the
    /// candidate is dropped.
    pub fn try_append(&mut self, candidate: CandidateBlock, proof: &str) -> Result<&Block, ChainError> {
        if let Err(e) = self.check(&candidate, proof) {
            warn!(index = candidate.index, error = %e, "rejected candidate block");
            return Err(e);
        }
        self.commit(candidate.into_sealed(proof.to_string()));
        Ok(self.tail())
    }

    pub fn append(&mut self, candidate: CandidateBlock, proof: &str) -> bool {
        self.try_append(candidate, proof).is_ok()
    }

    fn commit(&mut self, block: Block) {
        info!(index = block.index(), hash = %block.hash(), nonce = block.nonce(), "appended block");
        self.blocks.push(block);
    }

    /// Seals a block holding `transactions` on top of the tail and appends it.
    /// The block is returned whether or not the append succeeded; use
    /// [`mine_with_outcome`](Self::mine_with_outcome) to learn which.
    pub fn mine(&mut self, transactions: Vec<Transaction>) -> Block {
        self.mine_with_outcome(transactions).block
    }

    pub fn mine_with_outcome(&mut self, transactions: Vec<Transaction>) -> MineOutcome {
        let mut candidate = self.candidate(transactions);
        let proof = seal(&mut candidate, self.difficulty);
        self.submit(candidate, proof)
    }

    /// Appends a sealed candidate and reports the outcome. Unlike
    /// [`try_append`](Self::try_append) the block is handed back even when
    /// it is rejected.
    pub fn submit(&mut self, candidate: CandidateBlock, proof: String) -> MineOutcome {
        match self.check(&candidate, &proof) {
            Ok(()) => {
                let block = candidate.into_sealed(proof);
                self.commit(block.clone());
                MineOutcome { block, appended: true }
            }
            Err(e) => {
                warn!(index = candidate.index, error = %e, "sealed block was not appended");
                MineOutcome {
                    block: candidate.into_sealed(proof),
                    appended: false,
                }
            }
        }
    }

    /// Re-checks every block: index, linkage, stored hash against the
    /// recomputed digest, and the difficulty prefix for non-genesis blocks.
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        let mut previous_hash = GENESIS_PREVIOUS_HASH;
        for (position, block) in self.blocks.iter().enumerate() {
            validate_sealed(block, position as u64, previous_hash, self.difficulty)?;
            previous_hash = block.hash();
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify_chain().is_ok()
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}
