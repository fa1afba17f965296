use std::path::Path;

use serde::Serialize;

use crate::{
    errors::{Outcome, Rejection, Result},
    utils::persistence,
};

use super::transaction::Transaction;

/// A monthly spending ceiling and the transactions recorded against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    monthly_limit: f64,
    transactions: Vec<Transaction>,
}

/// Running totals plus a borrowed view of the recorded transactions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BudgetSummary<'a> {
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub transactions: &'a [Transaction],
}

impl Budget {
    /// Creates an empty budget. Positivity of `monthly_limit` is the caller's concern.
    pub fn new(monthly_limit: f64) -> Self {
        Self {
            monthly_limit,
            transactions: Vec::new(),
        }
    }

    pub(crate) fn from_parts(monthly_limit: f64, transactions: Vec<Transaction>) -> Self {
        Self {
            monthly_limit,
            transactions,
        }
    }

    pub fn monthly_limit(&self) -> f64 {
        self.monthly_limit
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

    /// Appends `transaction` unless it would push total spending past the limit.
    /// Spending exactly up to the limit is allowed.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Outcome<&Transaction> {
        let total = self.total_spent();
        if total + transaction.amount > self.monthly_limit {
            tracing::warn!(
                amount = transaction.amount,
                total_spent = total,
                limit = self.monthly_limit,
                "transaction rejected: monthly limit exceeded"
            );
            return Err(Rejection::LimitExceeded {
                amount: transaction.amount,
                remaining: self.monthly_limit - total,
            });
        }
        tracing::info!(%transaction, "transaction added");
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Removes the transaction at `index`; negative indices count back from the newest entry.
    pub fn remove_transaction(&mut self, index: isize) -> Outcome<Transaction> {
        let len = self.transactions.len();
        let position = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        }
        .filter(|position| *position < len);

        match position {
            Some(position) => {
                let removed = self.transactions.remove(position);
                tracing::info!(position, transaction = %removed, "transaction removed");
                Ok(removed)
            }
            None => {
                tracing::warn!(
                    index,
                    len,
                    "transaction removal rejected: index out of range"
                );
                Err(Rejection::InvalidIndex { index, len })
            }
        }
    }

    /// Raises the monthly limit by `amount` and returns the new limit.
    /// The limit must stay finite, so an addition that overflows is turned down.
    pub fn add_funds(&mut self, amount: f64) -> Outcome<f64> {
        if amount.is_nan() || amount <= 0.0 {
            tracing::warn!(amount, "funds rejected: amount must be positive");
            return Err(Rejection::InvalidAmount(amount));
        }
        let raised = self.monthly_limit + amount;
        if !raised.is_finite() {
            tracing::warn!(
                amount,
                limit = self.monthly_limit,
                "funds rejected: limit would overflow"
            );
            return Err(Rejection::LimitOverflow {
                amount,
                limit: self.monthly_limit,
            });
        }
        self.monthly_limit = raised;
        tracing::info!(amount, limit = self.monthly_limit, "funds added");
        Ok(self.monthly_limit)
    }

    pub fn total_spent(&self) -> f64 {
        self.transactions.iter().map(|txn| txn.amount).sum()
    }

    /// Remaining headroom under the monthly limit.
    pub fn balance(&self) -> f64 {
        self.monthly_limit - self.total_spent()
    }

    pub fn summary(&self) -> BudgetSummary<'_> {
        BudgetSummary {
            total_spent: self.total_spent(),
            remaining_budget: self.balance(),
            transactions: &self.transactions,
        }
    }

    /// Writes the whole budget to `path`, replacing whatever was there.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        persistence::save_budget_to_file(self, path)
    }

    /// Reads a budget back from `path`; `Ok(None)` when no file exists yet.
    pub fn load_from_file(path: &Path) -> Result<Option<Self>> {
        persistence::load_budget_from_file(path)
    }
}
