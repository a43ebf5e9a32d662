//! Hashing codec: canonical block serialization and SHA-256 digests
//!
//! Every block digest is computed over the JSON Canonicalization Scheme (JCS)
//! form of its fields, so object keys are always emitted in sorted order no
//! matter how a transaction map was built.

use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

/// A ticket-ledger transaction: an opaque string-keyed record.
pub type Transaction = Map<String, Value>;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Borrowed view of the fields that make up a block's digest.
#[derive(Debug, Clone, Copy)]
pub struct BlockFields<'a> {
    pub index: u64,
    pub timestamp: u64,
    pub transactions: &'a [Transaction],
    pub previous_hash: &'a str,
    pub nonce: u64,
}

impl BlockFields<'_> {
    pub fn canonical_value(&self) -> Value {
        json!({
            "index": self.index,
            "timestamp": self.timestamp,
            "transactions": self.transactions,
            "previous_hash": self.previous_hash,
            "nonce": self.nonce,
        })
    }

    /// Canonical byte form of the block fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let value = self.canonical_value();
        // A Value holding only integers, strings and maps always canonicalises;
        // the sorted compact form is byte-identical for such trees.
        serde_jcs::to_vec(&value).unwrap_or_else(|_| value.to_string().into_bytes())
    }

    /// Lowercase hex SHA-256 of the canonical form.
    pub fn digest(&self) -> String {
        sha256_hex(&self.canonical_bytes())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(pairs: &[(&str, &str)]) -> Transaction {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    fn genesis_fields(transactions: &[Transaction]) -> BlockFields<'_> {
        BlockFields {
            index: 0,
            timestamp: 1672531200000,
            transactions,
            previous_hash: "0",
            nonce: 0,
        }
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_canonical_bytes_sort_keys() {
        let txs = vec![tx(&[("system", "genesis")])];
        let bytes = genesis_fields(&txs).canonical_bytes();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"index":0,"nonce":0,"previous_hash":"0","timestamp":1672531200000,"transactions":[{"system":"genesis"}]}"#
        );
    }

    #[test]
    fn test_digest_known_value() {
        let txs = vec![tx(&[("system", "genesis")])];
        let digest = genesis_fields(&txs).digest();
        assert_eq!(
            digest,
            "c4e2b47ed8d5db9ed4018997334bea8b4b32fe74c2d86bf9ff42600da320c650"
        );
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let txs = vec![tx(&[("event", "Carnival"), ("buyer", "Isha")])];
        let fields = genesis_fields(&txs);
        assert_eq!(fields.digest(), fields.digest());
    }

    #[test]
    fn test_digest_ignores_insertion_order() {
        let a = vec![tx(&[("type", "ISSUE"), ("event", "DJ Night"), ("buyer", "Kabir")])];
        let b = vec![tx(&[("buyer", "Kabir"), ("type", "ISSUE"), ("event", "DJ Night")])];
        assert_eq!(genesis_fields(&a).canonical_bytes(), genesis_fields(&b).canonical_bytes());
        assert_eq!(genesis_fields(&a).digest(), genesis_fields(&b).digest());
    }

    #[test]
    fn test_transaction_order_is_significant() {
        let first = tx(&[("buyer", "Aarav")]);
        let second = tx(&[("buyer", "Bhumi")]);
        let forward = vec![first.clone(), second.clone()];
        let reversed = vec![second, first];
        assert_ne!(genesis_fields(&forward).digest(), genesis_fields(&reversed).digest());
    }

    #[test]
    fn test_nonce_changes_digest() {
        let txs = vec![tx(&[("system", "genesis")])];
        let mut fields = genesis_fields(&txs);
        let before = fields.digest();
        fields.nonce = 1;
        assert_ne!(before, fields.digest());
    }
}
