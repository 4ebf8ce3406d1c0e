//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Records are read in batches and each batch is
//! scored with one task per account.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (duplicate claims + account partitioning)
//!     └── AsyncScoringEngine (thread-safe scoring)
//!         └── AsyncTransactionStore (claimed IDs + per-account histories)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so an account's transactions
//!   are scored in input order even when they span batches
//! - Within a batch, duplicates are settled in input order before any account
//!   is scored
//! - Results are written in input order, so the report is identical to the
//!   one produced by the sync strategy

use crate::core::r#async::{AsyncScoringEngine, AsyncTransactionStore, BatchProcessor};
use crate::core::ScoringPolicy;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::ScoreReportWriter;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::ScoringError;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of transactions per batch
    pub batch_size: usize,
    /// Number of worker threads scoring a batch
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Calibration handed to the engine
    policy: ScoringPolicy,
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(policy: ScoringPolicy, config: BatchConfig) -> Self {
        Self { policy, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, ScoringError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()?;

        runtime.block_on(async {
            let transaction_store = Arc::new(AsyncTransactionStore::new());
            let engine = Arc::new(AsyncScoringEngine::new(transaction_store, self.policy));
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => {
                        ScoringError::file_not_found(&input_path.display().to_string())
                    }
                    _ => ScoringError::from(e),
                })?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut report = ScoreReportWriter::new(output)?;
            let mut summary = ProcessingSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                // Finish this batch before reading the next one to keep per-account order
                for scored in processor.process_batch(batch).await? {
                    report.write(&scored)?;
                    summary.record(&scored);
                }
            }

            report.finish()?;
            summary.skipped = reader.skipped();
            Ok(summary)
        })
    }
}
