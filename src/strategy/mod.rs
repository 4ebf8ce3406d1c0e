//! Processing strategy module for batch scoring
//!
//! This module defines the Strategy pattern for complete scoring pipelines,
//! covering CSV parsing, scoring and report output. Different implementations
//! (synchronous, asynchronous batch) can be selected at runtime and produce
//! identical reports for the same input.

use crate::cli::StrategyType;
use crate::core::ScoringPolicy;
use crate::types::{ScoredTransaction, ScoringError};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counters describing one processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Well-formed records scored (duplicates included)
    pub scored: u64,

    /// Records that received a non-zero score
    pub flagged: u64,

    /// Malformed records skipped
    pub skipped: u64,
}

impl ProcessingSummary {
    /// Count one scored record
    pub fn record(&mut self, scored: &ScoredTransaction) {
        self.scored += 1;
        if scored.score > 0 {
            self.flagged += 1;
        }
    }
}

/// Processing strategy trait for complete scoring pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Score transactions from the input file and write the report to output
    ///
    /// The report holds one row per well-formed input record, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    ///
    /// Malformed records are logged and skipped; they never fail the run.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, ScoringError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `policy` - Calibration handed to the scoring engine
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    policy: ScoringPolicy,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(policy)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(policy, config))
        }
    }
}
