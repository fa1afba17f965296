use std::fs;
use std::path::Path;

use budget_tracker::{
    errors::BudgetError,
    ledger::{Budget, Transaction},
};
use serde_json::Value;
use tempfile::tempdir;

fn sample_budget() -> Budget {
    let mut budget = Budget::new(120.0);
    budget
        .add_transaction(Transaction::new(50.0, "food", "dinner"))
        .unwrap();
    budget
        .add_transaction(Transaction::new(12.25, "café", "croissant & \"coffee\""))
        .unwrap();
    budget
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn save_then_load_restores_identical_state() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let budget = sample_budget();

    budget.save_to_file(&path).unwrap();
    let restored = Budget::load_from_file(&path).unwrap().expect("state present");

    assert_eq!(restored, budget);
    assert_eq!(restored.monthly_limit(), 120.0);
    assert_eq!(restored.transactions()[1].amount, 12.25);
}

#[test]
fn empty_budget_round_trips() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("empty.json");
    Budget::new(5.0).save_to_file(&path).unwrap();

    let restored = Budget::load_from_file(&path).unwrap().unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored.monthly_limit(), 5.0);
}

#[test]
fn saved_file_uses_exact_field_names() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget.json");
    sample_budget().save_to_file(&path).unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let root = document.as_object().unwrap();
    let mut keys: Vec<_> = root.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["monthly_limit", "transactions"]);
    assert_eq!(
        root["transactions"][0],
        serde_json::json!({"amount": 50.0, "category": "food", "description": "dinner"})
    );
    assert!(!tmp_path_for(&path).exists(), "staging file must be renamed away");
}

#[test]
fn loads_files_written_by_other_tools() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    fs::write(
        &path,
        r#"{"monthly_limit": 100, "transactions": [{"amount": 60, "category": "food", "description": "groceries"}]}"#,
    )
    .unwrap();

    let budget = Budget::load_from_file(&path).unwrap().unwrap();
    assert_eq!(budget.monthly_limit(), 100.0);
    assert_eq!(
        budget.transactions(),
        [Transaction::new(60.0, "food", "groceries")]
    );
}

#[test]
fn missing_file_is_absent_not_an_error() {
    let temp = tempdir().unwrap();
    let loaded = Budget::load_from_file(&temp.path().join("nope.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn save_overwrites_existing_state() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget.json");
    sample_budget().save_to_file(&path).unwrap();

    Budget::new(1.0).save_to_file(&path).unwrap();
    let restored = Budget::load_from_file(&path).unwrap().unwrap();
    assert_eq!(restored, Budget::new(1.0));
}

#[test]
fn malformed_files_surface_as_corrupt_state() {
    let temp = tempdir().unwrap();
    let cases = [
        ("not-json.json", "{ this is not json"),
        ("no-limit.json", r#"{"transactions": []}"#),
        ("no-transactions.json", r#"{"monthly_limit": 10}"#),
        (
            "no-category.json",
            r#"{"monthly_limit": 10, "transactions": [{"amount": 1, "description": "x"}]}"#,
        ),
        ("array.json", "[]"),
        ("string-limit.json", r#"{"monthly_limit": "ten", "transactions": []}"#),
    ];

    for (name, contents) in cases {
        let path = temp.path().join(name);
        fs::write(&path, contents).unwrap();
        match Budget::load_from_file(&path) {
            Err(BudgetError::CorruptState { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("{name}: expected corrupt state, got {other:?}"),
        }
    }
}

#[test]
fn corrupt_state_reason_names_the_missing_field() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget.json");
    fs::write(
        &path,
        r#"{"monthly_limit": 10, "transactions": [{"amount": 1, "category": "x"}]}"#,
    )
    .unwrap();

    let err = Budget::load_from_file(&path).unwrap_err();
    assert!(
        err.to_string().contains("missing field `description`"),
        "unexpected message: {err}"
    );
}

#[test]
fn failed_save_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget.json");
    let budget = sample_budget();
    budget.save_to_file(&path).unwrap();
    let original = fs::read_to_string(&path).unwrap();

    // A directory squatting on the staging path makes the write fail.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    let result = Budget::new(999.0).save_to_file(&path);
    assert!(matches!(result, Err(BudgetError::Io(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn unwritable_location_is_an_io_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("missing-dir").join("budget.json");
    let err = sample_budget().save_to_file(&path).unwrap_err();
    assert!(matches!(err, BudgetError::Io(_)));
}

#[test]
fn infinite_limit_is_refused_and_previous_state_kept() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget.json");
    let budget = sample_budget();
    budget.save_to_file(&path).unwrap();

    let mut overflowing = Budget::new(f64::INFINITY);
    overflowing
        .add_transaction(Transaction::new(5.0, "misc", "snack"))
        .unwrap();
    let err = overflowing.save_to_file(&path).unwrap_err();
    assert!(matches!(
        err,
        BudgetError::NonFiniteNumber {
            field: "monthly_limit",
            ..
        }
    ));

    let restored = Budget::load_from_file(&path).unwrap().unwrap();
    assert_eq!(restored, budget);
}

#[test]
fn failed_rename_removes_staging_file() {
    let temp = tempdir().unwrap();
    // A non-empty directory at the target path cannot be replaced by a file.
    let path = temp.path().join("budget.json");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();

    let err = sample_budget().save_to_file(&path).unwrap_err();
    assert!(matches!(err, BudgetError::Io(_)));
    assert!(!tmp_path_for(&path).exists(), "staging file must be cleaned up");
    assert!(path.join("keep").exists());
}
