//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transaction records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - A missing file is reported by `open()`
//! - Individual record errors are yielded as Err variants in the iterator;
//!   `line()` tells which input line produced the last item
//! - A read failure is yielded once as `IoError` and ends the iteration
//! - Only well-formed records consume a sequence number

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{ScoringError, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Synchronous CSV reader
///
/// # Examples
///
/// ```no_run
/// use fraud_scoring_engine::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::open(Path::new("transactions.csv")).unwrap();
/// let records: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Successfully parsed {} records", records.len());
/// ```
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    reader: csv::Reader<R>,
    line_num: u64,
    next_seq: u64,
    headers_read: bool,
    failed: bool,
}

impl SyncReader<File> {
    /// Open a CSV file for streaming
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path does not exist and `IoError` for any
    /// other failure to open it.
    pub fn open(path: &Path) -> Result<Self, ScoringError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScoringError::file_not_found(&path.display().to_string()),
            _ => ScoringError::from(e),
        })?;

        Ok(Self::new(file))
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap any reader producing CSV data
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// allow flexible field counts.
    pub fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(input);

        Self {
            reader,
            line_num: 1,
            next_seq: 0,
            headers_read: false,
            failed: false,
        }
    }

    /// Input line of the most recently yielded item (the header is line 1)
    pub fn line(&self) -> u64 {
        self.line_num
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<TransactionRecord, ScoringError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // The csv deserializer drops header read errors, so read them up front
        if !self.headers_read {
            self.headers_read = true;
            if let Err(e) = self.reader.byte_headers() {
                self.failed = true;
                return Some(Err(e.into()));
            }
        }

        let result = self.reader.deserialize::<CsvRecord>().next()?;
        self.line_num += 1;

        let transaction = match result {
            Ok(csv_record) => convert_csv_record(csv_record),
            Err(e) => Err(ScoringError::from(e)),
        };

        if matches!(&transaction, Err(e) if !e.is_recoverable()) {
            self.failed = true;
        }

        Some(transaction.map(|transaction| {
            let seq = self.next_seq;
            self.next_seq += 1;
            TransactionRecord { seq, transaction }
        }))
    }
}
