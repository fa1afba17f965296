use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    errors::{BudgetError, Result},
    ledger::{Budget, Transaction},
};

const MONTHLY_LIMIT: &str = "monthly_limit";
const TRANSACTIONS: &str = "transactions";
const TMP_SUFFIX: &str = "tmp";

/// Writes the budget to disk atomically by staging to a temporary file.
pub fn save_budget_to_file(budget: &Budget, path: &Path) -> Result<()> {
    ensure_finite(MONTHLY_LIMIT, budget.monthly_limit())?;
    for txn in budget.transactions() {
        ensure_finite("amount", txn.amount)?;
    }

    let records: Vec<Value> = budget
        .transactions()
        .iter()
        .map(|txn| Value::Object(txn.to_structured()))
        .collect();
    let mut document = Map::new();
    document.insert(MONTHLY_LIMIT.into(), Value::from(budget.monthly_limit()));
    document.insert(TRANSACTIONS.into(), Value::Array(records));
    let data = serde_json::to_string_pretty(&Value::Object(document))
        .map_err(std::io::Error::from)?;

    let tmp = tmp_path(path);
    if let Err(err) = fs::write(&tmp, data).and_then(|()| fs::rename(&tmp, path)) {
        discard_staging_file(&tmp);
        return Err(err.into());
    }
    tracing::info!(
        path = %path.display(),
        transactions = budget.len(),
        "budget saved"
    );
    Ok(())
}

/// Loads a budget snapshot from disk. A missing file yields `Ok(None)`.
pub fn load_budget_from_file(path: &Path) -> Result<Option<Budget>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no saved budget found");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let budget = parse_budget(&data).map_err(|reason| BudgetError::CorruptState {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::info!(path = %path.display(), "budget loaded");
    tracing::debug!(
        limit = budget.monthly_limit(),
        transactions = budget.len(),
        "loaded budget state"
    );
    Ok(Some(budget))
}

fn parse_budget(data: &str) -> std::result::Result<Budget, String> {
    let document: Value = serde_json::from_str(data).map_err(|err| err.to_string())?;
    let root = document
        .as_object()
        .ok_or_else(|| "top level must be an object".to_string())?;

    let monthly_limit = root
        .get(MONTHLY_LIMIT)
        .ok_or_else(|| BudgetError::MissingField(MONTHLY_LIMIT).to_string())?
        .as_f64()
        .ok_or_else(|| invalid(MONTHLY_LIMIT, "a number"))?;
    let entries = root
        .get(TRANSACTIONS)
        .ok_or_else(|| BudgetError::MissingField(TRANSACTIONS).to_string())?
        .as_array()
        .ok_or_else(|| invalid(TRANSACTIONS, "an array"))?;

    let transactions = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            entry
                .as_object()
                .ok_or_else(|| format!("transaction {position} is not an object"))
                .and_then(|record: &Map<String, Value>| {
                    Transaction::from_structured(record)
                        .map_err(|err| format!("transaction {position}: {err}"))
                })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Budget::from_parts(monthly_limit, transactions))
}

// serde_json turns NaN and infinities into `null`, which would not load back.
fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BudgetError::NonFiniteNumber { field, value })
    }
}

fn discard_staging_file(tmp: &Path) {
    match fs::remove_file(tmp) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => tracing::warn!(
            path = %tmp.display(),
            error = %err,
            "could not remove staging file"
        ),
    }
}

fn invalid(field: &'static str, expected: &'static str) -> String {
    BudgetError::InvalidField { field, expected }.to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_keeps_original_extension() {
        assert_eq!(
            tmp_path(Path::new("/data/budget_data.json")),
            PathBuf::from("/data/budget_data.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("state")), PathBuf::from("state.tmp"));
    }

    #[test]
    fn non_finite_amounts_are_refused_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        let budget = Budget::from_parts(10.0, vec![Transaction::new(f64::NAN, "misc", "odd")]);

        let err = save_budget_to_file(&budget, &path).unwrap_err();
        assert!(matches!(
            err,
            BudgetError::NonFiniteNumber {
                field: "amount",
                ..
            }
        ));
        assert!(!path.exists());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn parse_rejects_non_object_entries() {
        let reason = parse_budget(r#"{"monthly_limit": 10, "transactions": [3]}"#).unwrap_err();
        assert_eq!(reason, "transaction 0 is not an object");
    }

    #[test]
    fn parse_reports_missing_limit() {
        let reason = parse_budget(r#"{"transactions": []}"#).unwrap_err();
        assert_eq!(reason, "missing field `monthly_limit`");
    }
}
