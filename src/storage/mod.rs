//! Storage layer for the finance tracker
//!
//! A small key-value abstraction over JSON files. Each key maps to one
//! `<key>.json` file in the data directory, written atomically. Reads never
//! fail the caller: a missing or unreadable value falls back to a default.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};

use std::collections::HashSet;
use std::hash::Hash;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, Period, Transaction};
use crate::services::{Ledger, LedgerObserver};

pub const TRANSACTIONS_KEY: &str = "finance-tracker-transactions";
pub const BUDGETS_KEY: &str = "finance-tracker-budgets";
pub const DARK_MODE_KEY: &str = "finance-tracker-dark-mode";
pub const SELECTED_MONTH_KEY: &str = "finance-tracker-selected-month";

/// Persistent key-value storage for serialisable values
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key has never been written
    fn try_load<T: DeserializeOwned>(&self, key: &str) -> FinanceResult<Option<T>>;

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> FinanceResult<()>;

    /// Read a value, falling back to `default` if it is missing or unreadable
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "failed to load stored value, using default");
                default
            }
        }
    }

    /// Write a value; failures are logged and otherwise ignored
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            error!(key, error = %e, "failed to save value");
        }
    }
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn try_load<T: DeserializeOwned>(&self, key: &str) -> FinanceResult<Option<T>> {
        read_json(self.path_for(key))
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> FinanceResult<()> {
        write_json_atomic(self.path_for(key), value)
    }
}

/// Everything the tracker persists
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub dark_mode: bool,
    pub selected_month: Period,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            dark_mode: false,
            selected_month: Period::current(),
        }
    }
}

/// Storage coordinator over the tracker's keys
#[derive(Debug, Clone)]
pub struct Storage {
    paths: FinancePaths,
    store: JsonFileStore,
}

impl Storage {
    /// Open storage, creating the data directory if needed
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;
        let store = JsonFileStore::new(paths.data_dir());
        info!(dir = %paths.data_dir().display(), "opened storage");
        Ok(Self { paths, store })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Load every key, defaulting whatever is missing or corrupt
    ///
    /// A collection holding an invalid entry or a repeated id counts as
    /// corrupt and loads empty.
    pub fn load_state(&self) -> AppState {
        let transactions = self.store.load(TRANSACTIONS_KEY, Vec::new());
        let budgets = self.store.load(BUDGETS_KEY, Vec::new());

        AppState {
            transactions: checked(TRANSACTIONS_KEY, transactions, Transaction::validate, |t| {
                &t.id
            }),
            budgets: checked(BUDGETS_KEY, budgets, Budget::validate, |b| &b.id),
            dark_mode: self.dark_mode(),
            selected_month: self.selected_month(),
        }
    }

    /// Build a ledger over the stored collections that saves back on change
    pub fn open_ledger(&self, strict_categories: bool) -> Ledger {
        let state = self.load_state();
        Ledger::new(state.transactions, state.budgets)
            .with_strict_categories(strict_categories)
            .with_observer(Box::new(self.clone()))
    }

    /// The month views default to; the current month if none is stored
    pub fn selected_month(&self) -> Period {
        self.store.load(SELECTED_MONTH_KEY, Period::current())
    }

    pub fn dark_mode(&self) -> bool {
        self.store.load(DARK_MODE_KEY, false)
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) {
        self.store.save(TRANSACTIONS_KEY, transactions);
    }

    pub fn save_budgets(&self, budgets: &[Budget]) {
        self.store.save(BUDGETS_KEY, budgets);
    }

    pub fn save_dark_mode(&self, enabled: bool) {
        self.store.save(DARK_MODE_KEY, &enabled);
    }

    pub fn save_selected_month(&self, month: Period) {
        self.store.save(SELECTED_MONTH_KEY, &month);
    }
}

/// The collection itself, or empty if any entry breaks an invariant
fn checked<T, K>(
    key: &str,
    items: Vec<T>,
    validate: impl Fn(&T) -> FinanceResult<()>,
    id_of: impl Fn(&T) -> &K,
) -> Vec<T>
where
    K: Eq + Hash + std::fmt::Display,
{
    let invalid = {
        let mut seen = HashSet::new();
        items.iter().enumerate().find_map(|(index, item)| match validate(item) {
            Err(e) => Some((index, e.to_string())),
            Ok(()) if !seen.insert(id_of(item)) => {
                Some((index, format!("duplicate id '{}'", id_of(item))))
            }
            Ok(()) => None,
        })
    };

    match invalid {
        Some((index, problem)) => {
            warn!(key, index, %problem, "stored collection is invalid, using default");
            Vec::new()
        }
        None => items,
    }
}

impl LedgerObserver for Storage {
    fn transactions_changed(&mut self, transactions: &[Transaction]) {
        self.save_transactions(transactions);
    }

    fn budgets_changed(&mut self, budgets: &[Budget]) {
        self.save_budgets(budgets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetFormData, TransactionFormData, TransactionType};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_fresh_storage_loads_defaults() {
        let (_temp_dir, storage) = create_test_storage();
        let state = storage.load_state();

        assert!(state.transactions.is_empty());
        assert!(state.budgets.is_empty());
        assert!(!state.dark_mode);
        assert_eq!(state.selected_month, Period::current());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let (_temp_dir, storage) = create_test_storage();
        fs::write(storage.store().path_for(TRANSACTIONS_KEY), "{ not json").unwrap();
        fs::write(storage.store().path_for(SELECTED_MONTH_KEY), "\"2024-13\"").unwrap();
        fs::write(storage.store().path_for(DARK_MODE_KEY), "true").unwrap();

        let state = storage.load_state();
        assert!(state.transactions.is_empty());
        assert_eq!(state.selected_month, Period::current());
        assert!(state.dark_mode);
    }

    #[test]
    fn test_invalid_stored_transactions_fall_back_to_default() {
        let (_temp_dir, storage) = create_test_storage();
        let path = storage.store().path_for(TRANSACTIONS_KEY);

        fs::write(
            &path,
            r#"[{"id":"x","type":"expense","amount":-5,"category":"Food","description":"","date":"2024-03-01","createdAt":"2024-03-01T09:00:00Z"}]"#,
        )
        .unwrap();
        assert!(storage.open_ledger(false).transactions().is_empty());

        fs::write(
            &path,
            r#"[{"id":"x","type":"expense","amount":5,"category":"Food","description":"a","date":"2024-03-01","createdAt":"2024-03-01T09:00:00Z"},
                {"id":"x","type":"expense","amount":7,"category":"Food","description":"b","date":"2024-03-02","createdAt":"2024-03-02T09:00:00Z"}]"#,
        )
        .unwrap();
        assert!(storage.load_state().transactions.is_empty());

        fs::write(
            &path,
            r#"[{"id":"x","type":"expense","amount":5,"category":"Food","description":"a","date":"2024-03-01","createdAt":"2024-03-01T09:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(storage.load_state().transactions.len(), 1);
    }

    #[test]
    fn test_invalid_stored_budgets_fall_back_to_default() {
        let (_temp_dir, storage) = create_test_storage();
        fs::write(
            storage.store().path_for(BUDGETS_KEY),
            r#"[{"id":"b","category":"Food","amount":0,"month":"2024-03"}]"#,
        )
        .unwrap();

        assert!(storage.load_state().budgets.is_empty());
    }

    #[test]
    fn test_key_files_use_storage_key_names() {
        let (temp_dir, storage) = create_test_storage();
        storage.save_dark_mode(true);
        storage.save_selected_month(Period::parse("2024-03").unwrap());

        let data = temp_dir.path().join("data");
        assert!(data.join("finance-tracker-dark-mode.json").exists());
        let month = fs::read_to_string(data.join("finance-tracker-selected-month.json")).unwrap();
        assert_eq!(month.trim(), "\"2024-03\"");
    }

    #[test]
    fn test_ledger_mutations_persist() {
        let (_temp_dir, storage) = create_test_storage();
        let march = Period::parse("2024-03").unwrap();

        {
            let mut ledger = storage.open_ledger(false);
            ledger
                .add_budget(&BudgetFormData::new("Food", "100"), march)
                .unwrap();
            ledger
                .add(&TransactionFormData::new(
                    TransactionType::Expense,
                    "42.10",
                    "Food",
                    "Groceries",
                    "2024-03-04",
                ))
                .unwrap();
        }

        let state = storage.load_state();
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].amount.cents(), 4210);
        assert_eq!(state.budgets.len(), 1);
        assert_eq!(state.budgets[0].spent().cents(), 4210);
    }

    #[test]
    fn test_json_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());

        assert_eq!(store.load("missing", 7u32), 7);
        store.save("count", &3u32);
        assert_eq!(store.load("count", 0u32), 3);
        assert_eq!(store.try_load::<u32>("count").unwrap(), Some(3));
    }
}
