use super::transaction::{Transaction, TransactionKind};
use crate::errors::LedgerError;

/// Ordered collection of transactions. Insertion order is display order is
/// persisted order; records are addressed by their 1-based position.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

/// Totals over a non-empty ledger, alongside the entries they were computed
/// from.
#[derive(Debug)]
pub struct LedgerSummary<'a> {
    pub total_income: f64,
    pub total_expense: f64,
    pub entries: &'a [Transaction],
}

impl LedgerSummary<'_> {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, returning its 1-based position.
    pub fn add(&mut self, transaction: Transaction) -> usize {
        self.transactions.push(transaction);
        self.transactions.len()
    }

    /// Removes the record at the given 1-based position and returns it.
    /// Subsequent records shift down by one. An empty ledger is reported as
    /// its own condition so callers can render a clearer message than a
    /// bounds failure.
    pub fn remove(&mut self, position: usize) -> Result<Transaction, LedgerError> {
        if self.transactions.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        if position == 0 || position > self.transactions.len() {
            return Err(LedgerError::IndexOutOfRange {
                index: position,
                len: self.transactions.len(),
            });
        }
        Ok(self.transactions.remove(position - 1))
    }

    /// Sums income and expense amounts over the full sequence. `None` on an
    /// empty ledger, so callers can tell "no records" apart from all-zero
    /// totals.
    pub fn summarize(&self) -> Option<LedgerSummary<'_>> {
        if self.transactions.is_empty() {
            return None;
        }
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        for txn in &self.transactions {
            match txn.kind() {
                TransactionKind::Income => total_income += txn.amount(),
                TransactionKind::Expense => total_expense += txn.amount(),
            }
        }
        Some(LedgerSummary {
            total_income,
            total_expense,
            entries: &self.transactions,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: TransactionKind, category: &str, amount: f64) -> Transaction {
        Transaction::new(kind, category, amount).expect("valid transaction")
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(entry(TransactionKind::Income, "Salary", 5000.0));
        ledger.add(entry(TransactionKind::Expense, "Food", 120.5));
        ledger.add(entry(TransactionKind::Expense, "Subscription", 9.99));
        ledger
    }

    #[test]
    fn add_appends_in_order_and_reports_position() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.add(entry(TransactionKind::Income, "Salary", 5000.0)), 1);
        assert_eq!(ledger.add(entry(TransactionKind::Expense, "Food", 42.0)), 2);
        assert_eq!(ledger.transactions()[0].category(), "Salary");
        assert_eq!(ledger.transactions()[1].category(), "Food");
    }

    #[test]
    fn remove_shifts_later_records_down() {
        let mut ledger = sample_ledger();
        let removed = ledger.remove(2).expect("remove middle record");
        assert_eq!(removed.category(), "Food");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[1].category(), "Subscription");
    }

    #[test]
    fn remove_on_empty_ledger_reports_the_empty_condition() {
        let mut ledger = Ledger::new();
        let err = ledger.remove(1).expect_err("empty ledger must fail");
        assert!(matches!(err, LedgerError::EmptyLedger));
    }

    #[test]
    fn remove_out_of_range_fails_without_mutating() {
        let mut ledger = sample_ledger();
        for position in [0, 4] {
            let err = ledger.remove(position).expect_err("out of range must fail");
            assert!(
                matches!(err, LedgerError::IndexOutOfRange { index, len } if index == position && len == 3),
                "unexpected error: {err:?}"
            );
        }
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn summarize_totals_by_kind() {
        let ledger = sample_ledger();
        let summary = ledger.summarize().expect("non-empty ledger");
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expense, 120.5 + 9.99);
        assert!((summary.net() - (5000.0 - 120.5 - 9.99)).abs() < 1e-9);
        assert_eq!(summary.entries.len(), 3);
    }

    #[test]
    fn summarize_on_empty_ledger_is_none() {
        assert!(Ledger::new().summarize().is_none());
    }

    #[test]
    fn remove_then_summarize_drops_exactly_the_removed_amount() {
        let mut ledger = sample_ledger();
        let before = {
            let summary = ledger.summarize().unwrap();
            summary.total_income + summary.total_expense
        };
        let removed = ledger.remove(3).unwrap();
        let after = {
            let summary = ledger.summarize().unwrap();
            summary.total_income + summary.total_expense
        };
        assert!((before - after - removed.amount()).abs() < 1e-9);
    }
}
