//! Error types for TicketChain

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Invalid block linkage: expected previous hash {expected}, got {found}")]
    LinkageMismatch { expected: String, found: String },
    #[error("Invalid proof of work: {proof} does not have {difficulty} leading zeros")]
    InvalidProofOfWork { difficulty: u32, proof: String },
    #[error("Proof mismatch: recomputed digest {expected}, proof was {found}")]
    ProofMismatch { expected: String, found: String },
    #[error("Invalid block index: expected {expected}, got {found}")]
    IndexMismatch { expected: u64, found: u64 },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
