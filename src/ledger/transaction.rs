use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

/// Whether a transaction adds to or draws from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The literal used in the persisted file.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    /// Matches the persisted literals exactly; no case folding or trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidTransaction(format!(
                "unknown transaction type `{other}` (expected `Income` or `Expense`)"
            ))),
        }
    }
}

/// One income or expense record. Values are immutable once created and
/// always satisfy the field invariants: the category is non-empty and the
/// amount is strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    kind: TransactionKind,
    category: String,
    amount: f64,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
    ) -> Result<Self, LedgerError> {
        let category = category.into();
        if category.is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "category must not be empty".into(),
            ));
        }
        if amount.is_nan() || amount <= 0.0 {
            return Err(LedgerError::InvalidTransaction(format!(
                "amount must be greater than 0, got {amount}"
            )));
        }
        Ok(Self {
            kind,
            category,
            amount,
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}
