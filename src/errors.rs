use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not save transactions to `{path}`: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("transaction list is empty")]
    EmptyLedger,
    #[error("transaction id must be between 1 and {len}, got {index}")]
    IndexOutOfRange { index: usize, len: usize },
}
