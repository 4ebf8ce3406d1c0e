use crate::core::ScoringPolicy;
use crate::core::policy::{DEFAULT_CREDIT_STEP_THRESHOLD, DEFAULT_DEBIT_MULTIPLIER};
use crate::strategy::BatchConfig;
use crate::types::ScoringError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Score transactions for suspicious deviations from account history
#[derive(Parser, Debug)]
#[command(name = "fraud-scorer")]
#[command(about = "Score transactions for suspicious deviations from account history", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transaction records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for scoring transactions
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for batched multi-threaded"
    )]
    pub strategy: StrategyType,

    /// Number of transactions per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transactions per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads scoring a batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Multiplier applied to the account average for debits
    #[arg(
        long = "debit-multiplier",
        value_name = "FACTOR",
        default_value_t = DEFAULT_DEBIT_MULTIPLIER,
        help = "Debits are scored above FACTOR x the account's average amount"
    )]
    pub debit_multiplier: u64,

    /// Minimum step-up for a credit to be scored
    #[arg(
        long = "step-threshold",
        value_name = "AMOUNT",
        default_value_t = DEFAULT_CREDIT_STEP_THRESHOLD,
        help = "Minimum increase over the previous transaction for a credit to be scored"
    )]
    pub step_threshold: u64,

    /// Number of consecutive credit steps reported before suppression
    #[arg(
        long = "step-flag-limit",
        value_name = "COUNT",
        help = "Stop scoring a run of credit steps after COUNT consecutive steps (default: no limit)"
    )]
    pub step_flag_limit: Option<usize>,

    /// Verbosity of diagnostics written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level for stderr diagnostics"
    )]
    pub log_level: LogLevel,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Log levels accepted by `--log-level`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults. Zero values are replaced by
    /// the defaults in `BatchConfig::new`, which logs a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Build the scoring policy from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidPolicy` if any calibration value is zero.
    pub fn to_policy(&self) -> Result<ScoringPolicy, ScoringError> {
        ScoringPolicy::new(
            self.debit_multiplier,
            self.step_threshold,
            self.step_flag_limit,
        )
    }
}
