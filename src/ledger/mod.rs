//! Budget domain models: transactions and the budget that owns them.

pub mod budget;
pub mod transaction;

pub use budget::{Budget, BudgetSummary};
pub use transaction::Transaction;
