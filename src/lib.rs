//! Transaction Fraud-Scoring Engine Library
//! # Overview
//!
//! This library scores financial transactions for suspicious deviations from
//! each account's own history. Transactions are streamed from CSV through
//! either a sync or an async strategy, and every well-formed record receives
//! a non-negative score (0 means no anomaly).
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, ScoringError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Scoring components:
//!   - [`core::transaction_store`] - Append-only, duplicate-aware history indexed by account
//!   - [`core::heuristics`] - Debit magnitude and credit step heuristics
//!   - [`core::policy`] - Calibration of the heuristics
//!   - [`core::engine`] - Dedup, assess, append orchestration
//!   - [`core::r#async`] - Thread-safe engine and account-partitioned batches
//! - [`io`] - CSV ingestion and score report output
//! - [`strategy`] - Complete processing pipelines
//!
//! # Heuristics
//!
//! - **Debit**: scored by how far the amount exceeds a multiple of the
//!   account's average amount
//! - **Credit**: scored when the amount steps up from the account's previous
//!   transaction by at least the step threshold
//! - **Duplicate**: a transaction id seen before always scores 0 and is not
//!   recorded again
//!
//! # Example
//!
//! ```
//! use fraud_scoring_engine::{ScoringEngine, Transaction};
//!
//! let mut engine = ScoringEngine::new();
//! assert_eq!(engine.submit(Transaction::debit(1, 1, 100)), 0);
//! assert_eq!(engine.submit(Transaction::debit(1, 2, 500)), 300);
//! assert_eq!(engine.submit(Transaction::debit(1, 2, 500)), 0);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AsyncScoringEngine, ScoringEngine, ScoringPolicy, TransactionStore};
pub use types::{
    AccountId, Amount, Direction, Score, ScoredTransaction, ScoringError, Transaction,
    TransactionId, TransactionRecord,
};
