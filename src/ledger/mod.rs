pub mod ledger;
pub mod transaction;

pub use ledger::{Ledger, LedgerSummary};
pub use transaction::{Transaction, TransactionKind};
