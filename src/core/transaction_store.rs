//! Append-only transaction log
//!
//! This module provides the TransactionStore component that keeps every
//! accepted transaction in arrival order and answers account-scoped history
//! queries for the scoring heuristics.
//!
//! # Indexing
//!
//! Besides the global log the store keeps two indexes:
//! - a set of transaction IDs for O(1) duplicate detection across all accounts
//! - per-account positions into the log, so a history query never scans
//!   other accounts' transactions
//!
//! # Duplicate Handling
//!
//! The store does not silently drop duplicates. Appending a transaction whose
//! ID is already present is a logic error in the caller and panics; the
//! engine checks `contains` before every append.

use crate::types::{AccountId, Transaction, TransactionId};
use std::collections::{HashMap, HashSet};
use std::iter::FusedIterator;
use std::slice;

/// Append-only, duplicate-aware transaction log
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    /// Every accepted transaction in insertion order
    log: Vec<Transaction>,

    /// Identity keys of all stored transactions
    ids: HashSet<TransactionId>,

    /// Positions in `log` for each account, ascending
    by_account: HashMap<AccountId, Vec<usize>>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore {
            log: Vec::new(),
            ids: HashSet::new(),
            by_account: HashMap::new(),
        }
    }

    /// Check whether a transaction with this identity was already accepted
    ///
    /// The check spans the whole store, not a single account.
    pub fn contains(&self, tx_id: TransactionId) -> bool {
        self.ids.contains(&tx_id)
    }

    /// Ordered history of one account
    ///
    /// Returns a lazy view over the account's transactions in insertion
    /// order. The view is empty for an account that has never been seen and
    /// can be cloned to iterate it again.
    pub fn history_for(&self, account_id: AccountId) -> AccountHistory<'_> {
        let positions = self
            .by_account
            .get(&account_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        AccountHistory {
            log: &self.log,
            positions: positions.iter(),
        }
    }

    /// Append a transaction to the end of the log
    ///
    /// # Panics
    ///
    /// Panics if a transaction with the same ID is already stored.
    pub fn append(&mut self, transaction: Transaction) {
        let inserted = self.ids.insert(transaction.key());
        assert!(
            inserted,
            "transaction {} appended twice to the transaction store",
            transaction.key()
        );

        self.by_account
            .entry(transaction.account_id)
            .or_default()
            .push(self.log.len());
        self.log.push(transaction);
    }

    /// Number of stored transactions
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether the store holds no transactions
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Number of distinct accounts seen so far
    pub fn account_count(&self) -> usize {
        self.by_account.len()
    }

    /// All stored transactions in global insertion order
    pub fn iter(&self) -> slice::Iter<'_, Transaction> {
        self.log.iter()
    }
}

impl Extend<Transaction> for TransactionStore {
    /// Append every transaction in order
    ///
    /// # Panics
    ///
    /// Panics on the first duplicate, like [`TransactionStore::append`].
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for transaction in iter {
            self.append(transaction);
        }
    }
}

impl FromIterator<Transaction> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut store = TransactionStore::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a TransactionStore {
    type Item = &'a Transaction;
    type IntoIter = slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only view of one account's transactions in insertion order
#[derive(Debug, Clone)]
pub struct AccountHistory<'a> {
    log: &'a [Transaction],
    positions: slice::Iter<'a, usize>,
}

impl<'a> Iterator for AccountHistory<'a> {
    type Item = &'a Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&pos| &self.log[pos])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl DoubleEndedIterator for AccountHistory<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.positions.next_back().map(|&pos| &self.log[pos])
    }
}

impl ExactSizeIterator for AccountHistory<'_> {}

impl FusedIterator for AccountHistory<'_> {}
