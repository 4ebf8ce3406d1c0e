//! Thread-safe transaction storage for concurrent scoring
//!
//! This module provides the `AsyncTransactionStore` struct, which keeps
//! per-account histories in concurrent data structures so that transactions
//! for different accounts can be scored in parallel.
//!
//! # Design
//!
//! Two `DashMap`s replace the single log of the synchronous store:
//! - `ids` maps every claimed transaction ID to its account. Claiming an ID
//!   is atomic across the whole store, so of two racing submissions with the
//!   same ID exactly one wins.
//! - `histories` maps each account to its transactions in insertion order.
//!   Reading a history, scoring against it and appending happen while the
//!   account's shard lock is held.
//!
//! A transaction is first claimed, then appended. Between the two steps its
//! ID already counts as present for duplicate checks.

use crate::types::{AccountId, Transaction, TransactionId};
use dashmap::DashMap;

/// Thread-safe transaction store for concurrent scoring
#[derive(Debug, Default)]
pub struct AsyncTransactionStore {
    /// Claimed transaction IDs and the account that claimed them
    ids: DashMap<TransactionId, AccountId>,

    /// Per-account transaction history in insertion order
    histories: DashMap<AccountId, Vec<Transaction>>,
}

impl AsyncTransactionStore {
    /// Create a new empty AsyncTransactionStore
    pub fn new() -> Self {
        Self {
            ids: DashMap::new(),
            histories: DashMap::new(),
        }
    }

    /// Atomically reserve a transaction's identity
    ///
    /// Returns `true` if the ID was not present and now belongs to this
    /// transaction, `false` if it was already claimed.
    pub(crate) fn claim(&self, transaction: &Transaction) -> bool {
        let mut claimed = false;
        self.ids.entry(transaction.key()).or_insert_with(|| {
            claimed = true;
            transaction.account_id
        });
        claimed
    }

    /// Check whether a transaction ID has been claimed
    pub fn contains(&self, tx_id: TransactionId) -> bool {
        self.ids.contains_key(&tx_id)
    }

    /// Score a claimed transaction against its account history and append it
    ///
    /// `score` receives the account's prior transactions, oldest first, and
    /// runs while the account is locked; the transaction is appended right
    /// after it returns.
    pub(crate) fn append_with<R, F>(&self, transaction: Transaction, score: F) -> R
    where
        F: FnOnce(&[Transaction]) -> R,
    {
        debug_assert!(
            self.contains(transaction.key()),
            "transaction {} appended without being claimed",
            transaction.key()
        );

        let mut history = self
            .histories
            .entry(transaction.account_id)
            .or_insert_with(Vec::new);
        let result = score(history.as_slice());
        history.push(transaction);
        result
    }

    /// Snapshot of one account's history
    ///
    /// Returns an empty vector for an account that has never been seen.
    pub fn history_for(&self, account_id: AccountId) -> Vec<Transaction> {
        self.histories
            .get(&account_id)
            .map(|history| history.value().clone())
            .unwrap_or_default()
    }

    /// Number of appended transactions
    pub fn len(&self) -> usize {
        self.histories.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether no transaction has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct accounts seen so far
    pub fn account_count(&self) -> usize {
        self.histories.len()
    }
}
