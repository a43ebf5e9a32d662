//! Proof-of-work and linkage checks shared by append and the chain audit

use crate::blockchain::core::block::{Block, CandidateBlock};
use crate::error::ChainError;

/// True if the first `difficulty` characters of `digest` are all `'0'`.
pub fn meets_difficulty(digest: &str, difficulty: u32) -> bool {
    let required = difficulty as usize;
    digest.len() >= required && digest.bytes().take(required).all(|b| b == b'0')
}

pub fn validate_linkage(previous_hash: &str, tail_hash: &str) -> Result<(), ChainError> {
    if previous_hash != tail_hash {
        return Err(ChainError::LinkageMismatch {
            expected: tail_hash.to_string(),
            found: previous_hash.to_string(),
        });
    }
    Ok(())
}

/// Checks that `proof` satisfies the difficulty predicate and is the digest of
/// the candidate at its current nonce.
pub fn validate_proof(candidate: &CandidateBlock, proof: &str, difficulty: u32) -> Result<(), ChainError> {
    if !meets_difficulty(proof, difficulty) {
        return Err(ChainError::InvalidProofOfWork {
            difficulty,
            proof: proof.to_string(),
        });
    }
    let recomputed = candidate.recompute();
    if recomputed != proof {
        return Err(ChainError::ProofMismatch {
            expected: recomputed,
            found: proof.to_string(),
        });
    }
    Ok(())
}

/// Full invariant check for a block already in a chain at `position`.
/// Genesis is exempt from the difficulty predicate.
pub fn validate_sealed(
    block: &Block,
    position: u64,
    previous_hash: &str,
    difficulty: u32,
) -> Result<(), ChainError> {
    if block.index() != position {
        return Err(ChainError::IndexMismatch {
            expected: position,
            found: block.index(),
        });
    }
    validate_linkage(block.previous_hash(), previous_hash)?;
    let recomputed = block.recompute();
    if recomputed != block.hash() {
        return Err(ChainError::ProofMismatch {
            expected: recomputed,
            found: block.hash().to_string(),
        });
    }
    if !block.is_genesis() && !meets_difficulty(block.hash(), difficulty) {
        return Err(ChainError::InvalidProofOfWork {
            difficulty,
            proof: block.hash().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meets_difficulty() {
        assert!(meets_difficulty("00ab", 2));
        assert!(meets_difficulty("000b", 2));
        assert!(!meets_difficulty("0a0b", 2));
        assert!(meets_difficulty("anything", 0));
        assert!(!meets_difficulty("00", 3));
    }

    #[test]
    fn test_linkage_mismatch_reports_both_hashes() {
        let err = validate_linkage("wrong", "abc").unwrap_err();
        assert_eq!(
            err,
            ChainError::LinkageMismatch {
                expected: "abc".to_string(),
                found: "wrong".to_string()
            }
        );
    }

    #[test]
    fn test_proof_must_match_recomputed_digest() {
        let candidate = CandidateBlock::new(1, 0, vec![], "prev");
        let honest = candidate.recompute();
        assert!(validate_proof(&candidate, &honest, 0).is_ok());

        let forged = "0".repeat(64);
        assert!(matches!(
            validate_proof(&candidate, &forged, 1),
            Err(ChainError::ProofMismatch { .. })
        ));
        assert!(matches!(
            validate_proof(&candidate, "not-a-proof", 1),
            Err(ChainError::InvalidProofOfWork { .. })
        ));
    }
}
