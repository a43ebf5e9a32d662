//! Ledger handle for concurrent writers
//!
//! Sealing runs outside the lock against a snapshot of the tail. Validation
//! and append run together under the lock, so a candidate built on a stale
//! tail is rejected instead of forking the chain.

use crate::blockchain::{Blockchain, MineOutcome};
use crate::codec::Transaction;
use crate::miner::seal;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Blockchain>>,
}

impl SharedLedger {
    pub fn new(chain: Blockchain) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chain)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with the ledger locked.
    pub fn read<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&*self.inner.lock())
    }

    pub fn snapshot(&self) -> Blockchain {
        self.inner.lock().clone()
    }

    pub fn mine(&self, transactions: Vec<Transaction>) -> MineOutcome {
        let (mut candidate, difficulty) = {
            let chain = self.inner.lock();
            (chain.candidate(transactions), chain.difficulty())
        };

        let proof = seal(&mut candidate, difficulty);

        self.inner.lock().submit(candidate, proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::thread;

    fn tx(n: usize) -> Transaction {
        let mut tx = Transaction::new();
        tx.insert("seq".to_string(), Value::from(n as u64));
        tx
    }

    #[test]
    fn test_sequential_mining() {
        let ledger = SharedLedger::new(Blockchain::new(1));
        let outcome = ledger.mine(vec![tx(0)]);
        assert!(outcome.appended);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.read(|c| c.tail().hash().to_string()), outcome.block.hash());
    }

    #[test]
    fn test_concurrent_miners_keep_chain_valid() {
        let ledger = SharedLedger::new(Blockchain::new(1));
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    (0..5)
                        .filter(|i| ledger.mine(vec![tx(worker * 10 + i)]).appended)
                        .count()
                })
            })
            .collect();

        let appended: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let chain = ledger.snapshot();
        assert!(appended >= 1);
        assert_eq!(chain.len(), 1 + appended);
        assert!(chain.verify_chain().is_ok());
    }
}
