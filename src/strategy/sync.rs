//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It streams records from `SyncReader` through a
//! `ScoringEngine` and writes each score as soon as it is computed.
//!
//! Memory usage is O(transactions) for the engine's history; the input is
//! never loaded as a whole.

use crate::core::{ScoringEngine, ScoringPolicy};
use crate::io::csv_format::ScoreReportWriter;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::{ScoredTransaction, ScoringError};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use fraud_scoring_engine::core::ScoringPolicy;
/// use fraud_scoring_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ScoringPolicy::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("transactions.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    policy: ScoringPolicy,
}

impl SyncProcessingStrategy {
    /// Create a strategy that scores with `policy`
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, ScoringError> {
        let mut engine = ScoringEngine::with_policy(self.policy);
        let mut reader = SyncReader::open(input_path)?;
        let mut report = ScoreReportWriter::new(output)?;
        let mut summary = ProcessingSummary::default();

        while let Some(result) = reader.next() {
            match result {
                Ok(record) => {
                    let scored = ScoredTransaction {
                        seq: record.seq,
                        transaction: record.transaction,
                        score: engine.submit(record.transaction),
                    };
                    report.write(&scored)?;
                    summary.record(&scored);
                }
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => {
                    summary.skipped += 1;
                    warn!(line = reader.line(), "Skipping malformed record: {e}");
                }
            }
        }

        report.finish()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(strategy: SyncProcessingStrategy, csv: &str) -> (ProcessingSummary, String) {
        let file = create_temp_csv(csv);
        let mut output = Vec::new();
        let summary = strategy.process(file.path(), &mut output).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sync_strategy_scores_in_input_order() {
        let csv = "account,tx,amount,direction\n\
                   1,101,1,debit\n\
                   1,102,1,credit\n\
                   1,500,100,credit\n\
                   1,203,1002,debit\n";

        let (summary, output) = run(SyncProcessingStrategy::default(), csv);

        assert_eq!(
            output,
            "tx,account,score\n101,1,0\n102,1,0\n500,1,0\n203,1,934\n"
        );
        assert_eq!(
            summary,
            ProcessingSummary {
                scored: 4,
                flagged: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_sync_strategy_reports_duplicates_with_zero() {
        let csv = "account,tx,amount,direction\n\
                   1,1,10,credit\n\
                   1,1,99999,debit\n";

        let (summary, output) = run(SyncProcessingStrategy::default(), csv);

        assert_eq!(output, "tx,account,score\n1,1,0\n1,1,0\n");
        assert_eq!(summary.flagged, 0);
    }

    #[test]
    fn test_sync_strategy_applies_policy() {
        let csv = "account,tx,amount,direction\n\
                   3,1,120,credit\n\
                   3,2,1500,credit\n\
                   3,3,2999,credit\n\
                   3,4,4498,credit\n\
                   3,5,5997,credit\n";
        let policy = ScoringPolicy::new(2, 1499, Some(2)).unwrap();

        let (summary, output) = run(SyncProcessingStrategy::new(policy), csv);

        assert_eq!(output, "tx,account,score\n1,3,0\n2,3,0\n3,3,1499\n4,3,1499\n5,3,0\n");
        assert_eq!(summary.flagged, 2);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(ScoringError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_continues_on_malformed_record() {
        let csv = "account,tx,amount,direction\n\
                   1,1,100,credit\n\
                   2,2,invalid,credit\n\
                   3,3,50,credit\n";

        let (summary, output) = run(SyncProcessingStrategy::default(), csv);

        assert_eq!(output, "tx,account,score\n1,1,0\n3,3,0\n");
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.scored, 2);
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }

    #[test]
    fn test_sync_strategy_fails_on_unreadable_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut output = Vec::new();

        let result = SyncProcessingStrategy::default().process(dir.path(), &mut output);
        assert!(matches!(result, Err(ScoringError::IoError { .. })));
    }
}
