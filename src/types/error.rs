//! Error types for the fraud-scoring engine
//!
//! The scoring core itself never fails: "nothing unusual", "cold start" and
//! "duplicate" are all reported as a score of 0. The errors below belong to
//! the layers around it (file ingestion, record conversion and policy
//! configuration).
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Record Errors**: Unknown direction, invalid amount
//! - **Configuration Errors**: Scoring policy values out of range

use thiserror::Error;

/// Main error type for the scoring engine's outer layers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Direction field is neither `debit` nor `credit`
    #[error("Invalid direction '{direction}' for transaction {tx}")]
    InvalidDirection {
        /// The invalid direction string
        direction: String,
        /// Transaction ID
        tx: u32,
    },

    /// Amount field is missing, negative or not an integer
    #[error("Invalid amount '{amount}' for transaction {tx}")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
        /// Transaction ID
        tx: u32,
    },

    /// A concurrent scoring task stopped before finishing its records
    ///
    /// This is fatal: the account's rows would be missing from the report.
    #[error("Scoring task failed: {message}")]
    TaskFailed {
        /// Description of the failure
        message: String,
    },

    /// A scoring policy value is out of range
    ///
    /// This is a fatal configuration error.
    #[error("Invalid scoring policy: {field} = {value} ({reason})")]
    InvalidPolicy {
        /// Name of the offending policy field
        field: String,
        /// The rejected value
        value: u64,
        /// Why the value was rejected
        reason: String,
    },
}

impl From<std::io::Error> for ScoringError {
    fn from(error: std::io::Error) -> Self {
        ScoringError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ScoringError {
    fn from(error: csv::Error) -> Self {
        // A failing reader is fatal, not a malformed record
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return ScoringError::IoError {
                message: io_error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        ScoringError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for ScoringError {
    fn from(error: csv_async::Error) -> Self {
        if let csv_async::ErrorKind::Io(io_error) = error.kind() {
            return ScoringError::IoError {
                message: io_error.to_string(),
            };
        }

        ScoringError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ScoringError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ScoringError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an InvalidDirection error
    pub fn invalid_direction(direction: &str, tx: u32) -> Self {
        ScoringError::InvalidDirection {
            direction: direction.to_string(),
            tx,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, tx: u32) -> Self {
        ScoringError::InvalidAmount {
            amount: amount.to_string(),
            tx,
        }
    }

    /// Create an InvalidPolicy error
    pub fn invalid_policy(field: &str, value: u64, reason: &str) -> Self {
        ScoringError::InvalidPolicy {
            field: field.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    /// Whether processing can continue past this error
    ///
    /// Record-level errors only cost the offending row.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScoringError::ParseError { .. }
                | ScoringError::InvalidDirection { .. }
                | ScoringError::InvalidAmount { .. }
        )
    }
}
