//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading over transaction records from any async byte
//! source, for the async processing strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of TransactionRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{ScoringError, TransactionRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Malformed records are logged and skipped; only well-formed records
/// consume a sequence number. A read failure is returned as an error.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    next_seq: u64,
    skipped: u64,
    headers_read: bool,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            next_seq: 0,
            skipped: 0,
            headers_read: false,
        }
    }

    /// Read a batch of transaction records
    ///
    /// Reads until `batch_size` well-formed records are collected or the
    /// input ends. Returns an empty vector at end of input.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::IoError` if the underlying reader fails.
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Vec<TransactionRecord>, ScoringError> {
        // Header read errors are not surfaced by the record stream
        if !self.headers_read {
            self.headers_read = true;
            self.csv_reader.byte_headers().await?;
        }

        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let outcome = match records.next().await {
                Some(Ok(csv_record)) => convert_csv_record(csv_record),
                Some(Err(e)) => Err(ScoringError::from(e)),
                None => break,
            };

            match outcome {
                Ok(transaction) => {
                    batch.push(TransactionRecord {
                        seq: self.next_seq,
                        transaction,
                    });
                    self.next_seq += 1;
                }
                Err(e) if e.is_recoverable() => {
                    self.skipped += 1;
                    warn!("Skipping malformed record: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(batch)
    }

    /// Number of malformed records skipped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
