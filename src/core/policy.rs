//! Scoring calibration
//!
//! The constants that turn the heuristics into scores are policy, not code:
//! they are carried by a `ScoringPolicy` value handed to the engine.

use crate::types::{Amount, ScoringError};

/// Default multiplier applied to the account's average amount for debits
pub const DEFAULT_DEBIT_MULTIPLIER: u64 = 2;

/// Default minimum step-up between consecutive transactions for credits
pub const DEFAULT_CREDIT_STEP_THRESHOLD: Amount = 1499;

/// Calibration of the scoring heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// A debit is scored once it exceeds `debit_multiplier × average`
    pub debit_multiplier: u64,

    /// Minimum increase over the previous transaction for a credit to count
    /// as a qualifying step. Also the score reported for such a step.
    pub credit_step_threshold: Amount,

    /// Maximum number of consecutive qualifying steps reported per run
    ///
    /// `None` reports every qualifying step. `Some(n)` suppresses a step when
    /// the account's history already ends in `n` or more qualifying steps.
    pub step_flag_limit: Option<usize>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            debit_multiplier: DEFAULT_DEBIT_MULTIPLIER,
            credit_step_threshold: DEFAULT_CREDIT_STEP_THRESHOLD,
            step_flag_limit: None,
        }
    }
}

impl ScoringPolicy {
    /// Create a validated policy
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidPolicy` if the multiplier, the threshold
    /// or the step flag limit is zero.
    pub fn new(
        debit_multiplier: u64,
        credit_step_threshold: Amount,
        step_flag_limit: Option<usize>,
    ) -> Result<Self, ScoringError> {
        let policy = Self {
            debit_multiplier,
            credit_step_threshold,
            step_flag_limit,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check every field is within range
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.debit_multiplier == 0 {
            return Err(ScoringError::invalid_policy(
                "debit_multiplier",
                0,
                "must be at least 1",
            ));
        }

        if self.credit_step_threshold == 0 {
            return Err(ScoringError::invalid_policy(
                "credit_step_threshold",
                0,
                "must be at least 1",
            ));
        }

        if self.step_flag_limit == Some(0) {
            return Err(ScoringError::invalid_policy(
                "step_flag_limit",
                0,
                "must be at least 1 when set",
            ));
        }

        Ok(())
    }
}
