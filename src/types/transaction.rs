//! Transaction-related types for the fraud-scoring engine
//!
//! This module defines the transaction record observed by the engine, its
//! identity key, and the score produced for it.

use std::hash::{Hash, Hasher};

/// Account identifier
///
/// Accounts are not validated for existence; any value is accepted.
pub type AccountId = u32;

/// Transaction identifier
///
/// The sole identity key used for de-duplication.
pub type TransactionId = u32;

/// Magnitude of a funds movement
pub type Amount = u64;

/// Suspicion score
///
/// `0` means no anomaly was detected; larger values mean a larger deviation
/// from the account's historical behavior.
pub type Score = u64;

/// Direction of a funds movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Funds leaving the account
    Debit,

    /// Funds entering the account
    Credit,
}

impl Direction {
    /// Direction matching an `is_debit` flag
    pub fn from_is_debit(is_debit: bool) -> Self {
        if is_debit {
            Direction::Debit
        } else {
            Direction::Credit
        }
    }

    /// Lowercase name used in CSV input and log output
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }
}

/// A single observed transaction
///
/// Immutable once created. Two transactions are equal iff their
/// `transaction_id` values are equal: amount, account and direction do not
/// take part in identity.
#[derive(Debug, Clone, Copy)]
pub struct Transaction {
    /// The account that owns this transaction
    pub account_id: AccountId,

    /// Unique identity of the transaction
    pub transaction_id: TransactionId,

    /// Non-negative magnitude of the movement
    pub amount: Amount,

    /// `true` for an outflow, `false` for an inflow
    pub is_debit: bool,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        account_id: AccountId,
        transaction_id: TransactionId,
        amount: Amount,
        is_debit: bool,
    ) -> Self {
        Transaction {
            account_id,
            transaction_id,
            amount,
            is_debit,
        }
    }

    /// Shorthand for an outflow
    pub fn debit(account_id: AccountId, transaction_id: TransactionId, amount: Amount) -> Self {
        Self::new(account_id, transaction_id, amount, true)
    }

    /// Shorthand for an inflow
    pub fn credit(account_id: AccountId, transaction_id: TransactionId, amount: Amount) -> Self {
        Self::new(account_id, transaction_id, amount, false)
    }

    /// Identity key used for duplicate detection
    pub fn key(&self) -> TransactionId {
        self.transaction_id
    }

    /// Direction of the movement
    pub fn direction(&self) -> Direction {
        Direction::from_is_debit(self.is_debit)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Input record as read by the ingestion layer
///
/// Carries the zero-based position of the record in its input so that
/// results produced out of order (async strategy) can be reported in input
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Position of the record among the well-formed records of the input
    pub seq: u64,

    /// The parsed transaction
    pub transaction: Transaction,
}

/// A transaction together with the score it received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredTransaction {
    /// Position of the record in its input
    pub seq: u64,

    /// The submitted transaction
    pub transaction: Transaction,

    /// Score returned by the engine
    pub score: Score,
}
