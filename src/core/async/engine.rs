//! Transaction scoring for concurrent callers
//!
//! This module provides the `AsyncScoringEngine` struct, which runs the same
//! heuristics as the single-owner `ScoringEngine` over an
//! `AsyncTransactionStore`.
//!
//! # Architecture
//!
//! ```text
//! AsyncScoringEngine
//!     ├── Arc<AsyncTransactionStore>  (claimed IDs + per-account histories)
//!     └── ScoringPolicy               (calibration)
//! ```
//!
//! # Thread Safety
//!
//! The engine is cloneable and can be shared across tasks. A submission
//! claims the transaction ID first (atomic over the whole store), then reads
//! the account history, scores and appends under the account's lock.

use std::sync::Arc;

use super::AsyncTransactionStore;
use crate::core::engine::log_assessment;
use crate::core::heuristics::{self, Assessment, Signal};
use crate::core::policy::ScoringPolicy;
use crate::core::traits::Scorer;
use crate::types::{AccountId, Score, Transaction};
use tracing::debug;

/// Thread-safe scoring engine
#[derive(Debug, Clone)]
pub struct AsyncScoringEngine {
    /// Shared transaction history
    transaction_store: Arc<AsyncTransactionStore>,

    /// Calibration of the heuristics
    policy: ScoringPolicy,
}

impl AsyncScoringEngine {
    /// Create a new AsyncScoringEngine
    ///
    /// # Arguments
    ///
    /// * `transaction_store` - Arc-wrapped store shared with other users
    /// * `policy` - Calibration of the heuristics
    pub fn new(transaction_store: Arc<AsyncTransactionStore>, policy: ScoringPolicy) -> Self {
        Self {
            transaction_store,
            policy,
        }
    }

    /// Score a transaction and record it
    pub fn submit(&self, transaction: Transaction) -> Score {
        self.assess(transaction).score
    }

    /// Score a transaction and record it, reporting which signal fired
    pub fn assess(&self, transaction: Transaction) -> Assessment {
        if !self.claim(&transaction) {
            return Assessment::unflagged(Signal::Duplicate);
        }
        self.assess_claimed(transaction)
    }

    /// Reserve a transaction's identity ahead of scoring
    ///
    /// Returns `false` (and logs) if the ID is already known. Used by the
    /// batch processor to settle duplicates in input order before scoring
    /// accounts in parallel.
    pub(crate) fn claim(&self, transaction: &Transaction) -> bool {
        let claimed = self.transaction_store.claim(transaction);
        if !claimed {
            debug!(
                tx = transaction.transaction_id,
                account = transaction.account_id,
                "duplicate transaction ignored"
            );
        }
        claimed
    }

    /// Score and append a transaction whose identity was already claimed
    pub(crate) fn assess_claimed(&self, transaction: Transaction) -> Assessment {
        let assessment = self.transaction_store.append_with(transaction, |history| {
            heuristics::assess(&self.policy, history, &transaction)
        });
        log_assessment(&transaction, &assessment);
        assessment
    }

    /// Snapshot of one account's history
    pub fn history_for(&self, account_id: AccountId) -> Vec<Transaction> {
        self.transaction_store.history_for(account_id)
    }

    /// The shared store
    pub fn store(&self) -> &Arc<AsyncTransactionStore> {
        &self.transaction_store
    }

    /// The calibration in use
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }
}

impl Scorer for AsyncScoringEngine {
    fn submit(&mut self, transaction: Transaction) -> Score {
        AsyncScoringEngine::submit(self, transaction)
    }
}
