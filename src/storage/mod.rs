pub mod text_backend;

pub use text_backend::{load_ledger_from_path, save_ledger_to_path, LoadWarning, TextStorage};

use crate::errors::LedgerError;
use crate::ledger::Ledger;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends for a single ledger file.
pub trait StorageBackend: Send + Sync {
    /// Loads the backing store. Never fails: an unreadable store yields an
    /// empty ledger, and every problem encountered on the way is returned as
    /// a warning for the caller to render.
    fn load(&self) -> (Ledger, Vec<LoadWarning>);

    /// Rewrites the backing store with the full ledger contents.
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
