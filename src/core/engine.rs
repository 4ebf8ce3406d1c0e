//! Transaction scoring engine
//!
//! This module provides the ScoringEngine that owns the TransactionStore and
//! scores each submitted transaction against its account's history.
//!
//! Every submission is a single step:
//! - Duplicate check against the whole store (duplicates score 0 and are dropped)
//! - Heuristic evaluation against the account's prior history
//! - Append of the transaction, whatever its score

use crate::core::heuristics::{self, Assessment, Signal};
use crate::core::policy::ScoringPolicy;
use crate::core::traits::Scorer;
use crate::core::transaction_store::{AccountHistory, TransactionStore};
use crate::types::{AccountId, Score, Transaction};
use tracing::{debug, info};

/// Single-owner scoring engine
///
/// Exclusive access to the store is expressed through `&mut self`; for
/// concurrent callers use [`crate::core::AsyncScoringEngine`].
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    transaction_store: TransactionStore,
    policy: ScoringPolicy,
}

impl ScoringEngine {
    /// Create an engine with the default policy and an empty store
    pub fn new() -> Self {
        ScoringEngine {
            transaction_store: TransactionStore::new(),
            policy: ScoringPolicy::default(),
        }
    }

    /// Create an engine with a custom policy and an empty store
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self::with_store(TransactionStore::new(), policy)
    }

    /// Create an engine around an existing store
    ///
    /// Transactions already in `store` act as prior history and are never
    /// scored themselves.
    pub fn with_store(transaction_store: TransactionStore, policy: ScoringPolicy) -> Self {
        ScoringEngine {
            transaction_store,
            policy,
        }
    }

    /// Score a transaction and record it
    ///
    /// Returns 0 for duplicates, for an account's first transaction and
    /// whenever no heuristic fires.
    pub fn submit(&mut self, transaction: Transaction) -> Score {
        self.assess(transaction).score
    }

    /// Score a transaction and record it, reporting which signal fired
    pub fn assess(&mut self, transaction: Transaction) -> Assessment {
        if self.transaction_store.contains(transaction.key()) {
            debug!(
                tx = transaction.transaction_id,
                account = transaction.account_id,
                "duplicate transaction ignored"
            );
            return Assessment::unflagged(Signal::Duplicate);
        }

        let assessment = heuristics::assess(
            &self.policy,
            self.transaction_store.history_for(transaction.account_id),
            &transaction,
        );

        self.transaction_store.append(transaction);
        log_assessment(&transaction, &assessment);

        assessment
    }

    /// Ordered history of one account
    pub fn history_for(&self, account_id: AccountId) -> AccountHistory<'_> {
        self.transaction_store.history_for(account_id)
    }

    /// Read-only access to the underlying store
    pub fn store(&self) -> &TransactionStore {
        &self.transaction_store
    }

    /// The calibration in use
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Consume the engine and return its store
    pub fn into_store(self) -> TransactionStore {
        self.transaction_store
    }
}

impl Scorer for ScoringEngine {
    fn submit(&mut self, transaction: Transaction) -> Score {
        ScoringEngine::submit(self, transaction)
    }
}

/// Emit the per-transaction log line shared by both engines
pub(crate) fn log_assessment(transaction: &Transaction, assessment: &Assessment) {
    if assessment.is_flagged() {
        info!(
            tx = transaction.transaction_id,
            account = transaction.account_id,
            direction = transaction.direction().as_str(),
            amount = transaction.amount,
            score = assessment.score,
            signal = ?assessment.signal,
            "suspicious transaction"
        );
    } else {
        debug!(
            tx = transaction.transaction_id,
            account = transaction.account_id,
            signal = ?assessment.signal,
            "transaction scored 0"
        );
    }
}
