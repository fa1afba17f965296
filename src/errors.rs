use std::path::PathBuf;

use thiserror::Error;

/// Faults raised by the budget core and its persistence layer.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("corrupt budget state in {}: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },
    #[error("field `{field}` holds {value}, which cannot be stored as a JSON number")]
    NonFiniteNumber { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Recoverable outcomes of a budget mutation that left the state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("Transaction exceeds monthly budget limit ({amount} requested, {remaining} remaining).")]
    LimitExceeded { amount: f64, remaining: f64 },
    #[error("Invalid transaction index {index} ({len} transactions recorded).")]
    InvalidIndex { index: isize, len: usize },
    #[error("Amount to add must be positive (got {0}).")]
    InvalidAmount(f64),
    #[error("Adding {amount} would overflow the monthly budget limit ({limit}).")]
    LimitOverflow { amount: f64, limit: f64 },
}

/// Result of a budget mutation that may be turned down without a fault.
pub type Outcome<T> = std::result::Result<T, Rejection>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(BudgetError::Io(err))
    }
}
