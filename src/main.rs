//! Fraud-scorer CLI
//!
//! Command-line interface for scoring financial transactions from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > scores.csv
//! cargo run -- --strategy sync transactions.csv > scores.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 transactions.csv > scores.csv
//! cargo run -- --step-threshold 1000 --step-flag-limit 2 --log-level info transactions.csv > scores.csv
//! ```
//!
//! The program reads transaction records from the input CSV file, scores them
//! with the selected processing strategy and writes one `tx,account,score`
//! row per record to stdout. Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid arguments, file not found, file not readable, etc.)

use fraud_scoring_engine::cli;
use fraud_scoring_engine::strategy;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let args = cli::parse_args();
    setup_logging(args.log_level.into());

    let policy = match args.to_policy() {
        Ok(policy) => policy,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, policy, config)
    };

    let timer = Instant::now();
    let mut output = BufWriter::new(stdout().lock());
    let result = strategy
        .process(&args.input_file, &mut output)
        .and_then(|summary| output.flush().map(|_| summary).map_err(Into::into));

    match result {
        Ok(summary) => info!(
            scored = summary.scored,
            flagged = summary.flagged,
            skipped = summary.skipped,
            "Scored transactions in: {:?}",
            timer.elapsed()
        ),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
