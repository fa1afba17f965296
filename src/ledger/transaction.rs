use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{BudgetError, Result};

const AMOUNT: &str = "amount";
const CATEGORY: &str = "category";
const DESCRIPTION: &str = "description";

/// A single spending event recorded against a budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Flattens the transaction into the `amount`/`category`/`description` record
    /// stored in the state file.
    pub fn to_structured(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(AMOUNT.into(), Value::from(self.amount));
        map.insert(CATEGORY.into(), Value::from(self.category.clone()));
        map.insert(DESCRIPTION.into(), Value::from(self.description.clone()));
        map
    }

    /// Rebuilds a transaction from a flat record, reading exactly the three known keys.
    pub fn from_structured(map: &Map<String, Value>) -> Result<Self> {
        let amount = field(map, AMOUNT)?
            .as_f64()
            .ok_or(BudgetError::InvalidField {
                field: AMOUNT,
                expected: "a number",
            })?;
        let category = string_field(map, CATEGORY)?;
        let description = string_field(map, DESCRIPTION)?;
        Ok(Self {
            amount,
            category,
            description,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the fractional part of whole amounts ("60.0", not "60").
        write!(f, "{}: {:?} ({})", self.description, self.amount, self.category)
    }
}

fn field<'a>(map: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value> {
    map.get(name).ok_or(BudgetError::MissingField(name))
}

fn string_field(map: &Map<String, Value>, name: &'static str) -> Result<String> {
    field(map, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or(BudgetError::InvalidField {
            field: name,
            expected: "a string",
        })
}
