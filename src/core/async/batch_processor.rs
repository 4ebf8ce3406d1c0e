//! Batch scoring with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which scores batches of
//! transaction records in parallel while keeping every account's transactions
//! in input order.
//!
//! # Processing a batch
//!
//! 1. Claim every transaction ID sequentially, in input order. Duplicates are
//!    settled here, so the first occurrence in the input always wins, exactly
//!    as with sequential processing.
//! 2. Partition the accepted records by account.
//! 3. Score each account's partition on its own tokio task, in order.
//! 4. Merge the results back into input order.

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncScoringEngine;
use crate::types::{AccountId, ScoredTransaction, ScoringError, TransactionRecord};
use tokio::task::JoinHandle;
use tracing::error;

/// Batch processor with account-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe scoring engine
    ///
    /// Wrapped in Arc to enable sharing across async tasks.
    engine: Arc<AsyncScoringEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(engine: Arc<AsyncScoringEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch of records by account ID
    ///
    /// Each record appears in exactly one partition and every partition keeps
    /// the original relative order of its records.
    pub fn partition_by_account(
        &self,
        batch: Vec<TransactionRecord>,
    ) -> HashMap<AccountId, Vec<TransactionRecord>> {
        let mut account_batches: HashMap<AccountId, Vec<TransactionRecord>> = HashMap::new();

        for record in batch {
            account_batches
                .entry(record.transaction.account_id)
                .or_default()
                .push(record);
        }

        account_batches
    }

    /// Score one account's already-claimed records sequentially
    pub(crate) async fn process_account_transactions(
        &self,
        records: Vec<TransactionRecord>,
    ) -> Vec<ScoredTransaction> {
        records
            .into_iter()
            .map(|record| ScoredTransaction {
                seq: record.seq,
                transaction: record.transaction,
                score: self.engine.assess_claimed(record.transaction).score,
            })
            .collect()
    }

    /// Score a batch of records
    ///
    /// Returns one result per input record, duplicates included (score 0),
    /// sorted by input position.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TaskFailed` if an account's task panicked or was
    /// cancelled. The store may then hold part of that account's records.
    pub async fn process_batch(
        &self,
        batch: Vec<TransactionRecord>,
    ) -> Result<Vec<ScoredTransaction>, ScoringError> {
        let mut results = Vec::with_capacity(batch.len());
        let mut accepted = Vec::with_capacity(batch.len());

        for record in batch {
            if self.engine.claim(&record.transaction) {
                accepted.push(record);
            } else {
                results.push(ScoredTransaction {
                    seq: record.seq,
                    transaction: record.transaction,
                    score: 0,
                });
            }
        }

        let mut tasks = Vec::new();
        for (_account_id, records) in self.partition_by_account(accepted) {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_transactions(records).await
            }));
        }

        collect_account_results(tasks, &mut results).await?;

        results.sort_by_key(|scored| scored.seq);
        Ok(results)
    }
}

/// Await every account task, stopping at the first failure
async fn collect_account_results(
    tasks: Vec<JoinHandle<Vec<ScoredTransaction>>>,
    results: &mut Vec<ScoredTransaction>,
) -> Result<(), ScoringError> {
    for task in tasks {
        match task.await {
            Ok(account_results) => results.extend(account_results),
            Err(e) => {
                error!("Scoring task failed: {e}");
                return Err(ScoringError::TaskFailed {
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(())
}
