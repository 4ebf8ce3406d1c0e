//! Core scoring logic module
//!
//! This module contains the transaction scoring components:
//! - `traits` - Trait abstraction over the engines
//! - `transaction_store` - Append-only transaction log with per-account history
//! - `policy` - Calibration constants of the heuristics
//! - `heuristics` - Debit magnitude and credit step detection
//! - `engine` - Single-owner scoring orchestration
//! - `async` - Concurrent implementations

pub mod r#async;
pub mod engine;
pub mod heuristics;
pub mod policy;
pub mod traits;
pub mod transaction_store;

pub use engine::ScoringEngine;
pub use heuristics::{Assessment, Signal};
pub use policy::ScoringPolicy;
pub use r#async::{AsyncScoringEngine, AsyncTransactionStore, BatchProcessor};
pub use traits::Scorer;
pub use transaction_store::{AccountHistory, TransactionStore};
