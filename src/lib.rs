//! Finance Tracker - personal income, expense and budget tracking
//!
//! This library provides the core of the `finance` command-line tool: a
//! ledger of income and expense transactions, per-category monthly budgets
//! whose spend is always derived from the transactions, and monthly
//! summaries, breakdowns and exports.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, categories, periods)
//! - `services`: Aggregation, filtering, the mutation ledger, import
//! - `storage`: JSON key-value storage with atomic writes
//! - `export`: CSV, JSON and Markdown exporters
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::FinancePaths;
//! use finance_tracker::storage::Storage;
//!
//! let storage = Storage::new(FinancePaths::new()?)?;
//! let ledger = storage.open_ledger(false);
//! let march = ledger.summarize("2024-03".parse()?);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
