use tracing::{info, warn};

use crate::{
    errors::LedgerError,
    ledger::{Ledger, LedgerSummary, Transaction, TransactionKind},
    storage::{LoadWarning, StorageBackend},
};

/// Whether a mutation reached the backing store.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    Failed(LedgerError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Owns the live ledger together with its storage backend and keeps the two
/// in step: every successful mutation is followed by a save attempt, and a
/// failed save is reported without rolling the mutation back.
pub struct LedgerManager {
    storage: Box<dyn StorageBackend>,
    ledger: Ledger,
}

impl LedgerManager {
    /// Loads the backing store once and hands back the warnings for display.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, Vec<LoadWarning>) {
        let (ledger, warnings) = storage.load();
        info!(
            transactions = ledger.len(),
            warnings = warnings.len(),
            "ledger loaded"
        );
        (Self { storage, ledger }, warnings)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Validates and appends a record, then attempts to persist. A
    /// validation failure leaves the ledger untouched and skips the save.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount: f64,
    ) -> Result<SaveOutcome, LedgerError> {
        let transaction = Transaction::new(kind, category, amount)?;
        self.ledger.add(transaction);
        Ok(self.try_save())
    }

    /// Removes the record at the 1-based `position`, then attempts to
    /// persist. Returns the removed record alongside the save outcome.
    pub fn remove(&mut self, position: usize) -> Result<(Transaction, SaveOutcome), LedgerError> {
        let removed = self.ledger.remove(position)?;
        Ok((removed, self.try_save()))
    }

    pub fn summarize(&self) -> Option<LedgerSummary<'_>> {
        self.ledger.summarize()
    }

    /// Rewrites the backing store with the current ledger contents.
    pub fn persist(&self) -> Result<(), LedgerError> {
        self.storage.save(&self.ledger)
    }

    fn try_save(&self) -> SaveOutcome {
        match self.storage.save(&self.ledger) {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                warn!(error = %err, "ledger mutation not persisted");
                SaveOutcome::Failed(err)
            }
        }
    }
}
