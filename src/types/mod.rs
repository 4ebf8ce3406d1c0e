//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction record, identifiers and score
//! - `error`: Error types for the ingestion and configuration layers

pub mod error;
pub mod transaction;

pub use error::ScoringError;
pub use transaction::{
    AccountId, Amount, Direction, Score, ScoredTransaction, Transaction, TransactionId,
    TransactionRecord,
};
