//! CSV format handling for transaction input and score output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to transactions
//! - Score report serialization
//!
//! Input columns: `account, tx, amount, direction`
//! Output columns: `tx, account, score`

use crate::types::{AccountId, Amount, ScoredTransaction, ScoringError, Transaction, TransactionId};
use csv::Writer;
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// `amount` and `direction` stay strings so that bad values are reported as
/// record errors naming the transaction instead of generic parse errors.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub account: AccountId,
    pub tx: TransactionId,
    pub amount: String,
    pub direction: String,
}

/// Convert a CsvRecord to a Transaction
///
/// - `direction` must be `debit` or `credit` (case-insensitive)
/// - `amount` must be a non-negative integer
///
/// # Errors
///
/// Returns `InvalidDirection` or `InvalidAmount` for the offending field.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Transaction, ScoringError> {
    let is_debit = match csv_record.direction.trim().to_lowercase().as_str() {
        "debit" => true,
        "credit" => false,
        _ => {
            return Err(ScoringError::invalid_direction(
                &csv_record.direction,
                csv_record.tx,
            ))
        }
    };

    let amount: Amount = csv_record
        .amount
        .trim()
        .parse()
        .map_err(|_| ScoringError::invalid_amount(&csv_record.amount, csv_record.tx))?;

    Ok(Transaction::new(
        csv_record.account,
        csv_record.tx,
        amount,
        is_debit,
    ))
}

/// Streaming writer for the score report
///
/// Writes the header on creation and one row per scored transaction.
pub struct ScoreReportWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> ScoreReportWriter<W> {
    /// Create a report writer and emit the header row
    pub fn new(output: W) -> Result<Self, ScoringError> {
        let mut writer = Writer::from_writer(output);
        writer.write_record(["tx", "account", "score"])?;
        Ok(Self { writer })
    }

    /// Append one scored transaction to the report
    pub fn write(&mut self, scored: &ScoredTransaction) -> Result<(), ScoringError> {
        self.writer.write_record(&[
            scored.transaction.transaction_id.to_string(),
            scored.transaction.account_id.to_string(),
            scored.score.to_string(),
        ])?;
        Ok(())
    }

    /// Flush buffered rows to the underlying writer
    pub fn finish(mut self) -> Result<(), ScoringError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn csv_record(direction: &str, amount: &str) -> CsvRecord {
        CsvRecord {
            account: 1,
            tx: 7,
            amount: amount.to_string(),
            direction: direction.to_string(),
        }
    }

    #[rstest]
    #[case("debit", true)]
    #[case("credit", false)]
    #[case("DEBIT", true)] // case insensitive
    #[case(" Credit ", false)]
    fn test_convert_csv_record_direction(#[case] direction: &str, #[case] is_debit: bool) {
        let tx = convert_csv_record(csv_record(direction, "100")).unwrap();
        assert_eq!(tx.account_id, 1);
        assert_eq!(tx.transaction_id, 7);
        assert_eq!(tx.amount, 100);
        assert_eq!(tx.is_debit, is_debit);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("  1002  ", 1002)]
    #[case("18446744073709551615", u64::MAX)]
    fn test_convert_csv_record_amount_parsing(#[case] amount: &str, #[case] expected: Amount) {
        let tx = convert_csv_record(csv_record("credit", amount)).unwrap();
        assert_eq!(tx.amount, expected);
    }

    #[rstest]
    #[case::unknown_direction("sideways", "10", "Invalid direction")]
    #[case::empty_direction("", "10", "Invalid direction")]
    #[case::negative_amount("debit", "-5", "Invalid amount")]
    #[case::fractional_amount("debit", "10.5", "Invalid amount")]
    #[case::empty_amount("credit", "", "Invalid amount")]
    #[case::overflowing_amount("credit", "18446744073709551616", "Invalid amount")]
    fn test_convert_csv_record_errors(
        #[case] direction: &str,
        #[case] amount: &str,
        #[case] expected_error: &str,
    ) {
        let err = convert_csv_record(csv_record(direction, amount)).unwrap_err();
        assert!(err.to_string().contains(expected_error), "got: {}", err);
        assert!(err.is_recoverable());
    }

    #[rstest]
    #[case::empty(vec![], "tx,account,score\n")]
    #[case::keeps_given_order(
        vec![
            ScoredTransaction { seq: 0, transaction: Transaction::credit(3, 20, 5), score: 0 },
            ScoredTransaction { seq: 1, transaction: Transaction::debit(1, 10, 1002), score: 934 },
        ],
        "tx,account,score\n20,3,0\n10,1,934\n"
    )]
    fn test_report_writer_keeps_given_order(
        #[case] scored: Vec<ScoredTransaction>,
        #[case] expected: &str,
    ) {
        let mut output = Vec::new();
        let mut report = ScoreReportWriter::new(&mut output).unwrap();
        for entry in &scored {
            report.write(entry).unwrap();
        }
        report.finish().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_report_writer_streams_rows() {
        let mut output = Vec::new();
        {
            let mut report = ScoreReportWriter::new(&mut output).unwrap();
            report
                .write(&ScoredTransaction {
                    seq: 0,
                    transaction: Transaction::credit(1, 1, 1),
                    score: 0,
                })
                .unwrap();
            report
                .write(&ScoredTransaction {
                    seq: 1,
                    transaction: Transaction::credit(1, 2, 3000),
                    score: 1499,
                })
                .unwrap();
            report.finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "tx,account,score\n1,1,0\n2,1,1499\n"
        );
    }
}
