//! Core traits for transaction scoring
//!
//! This module defines the trait abstraction that allows the single-owner and
//! the concurrent engine to be driven interchangeably.

use crate::types::{Score, Transaction};

/// Trait for scoring transactions
///
/// Implementations must check for duplicates, score against prior history
/// and record every new transaction as one step.
pub trait Scorer {
    /// Score a transaction and record it
    ///
    /// Returns 0 for duplicates and for transactions with no detected anomaly.
    fn submit(&mut self, transaction: Transaction) -> Score;
}
