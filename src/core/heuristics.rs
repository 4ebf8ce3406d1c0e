//! Scoring heuristics
//!
//! Pure functions that score one transaction against the prior history of
//! its account. They never touch the store; both the single-owner engine and
//! the concurrent engine feed them a history view and act on the result.
//!
//! # Heuristics
//!
//! - **Debit magnitude**: a debit far above the account's average amount.
//!   Scores `amount − multiplier × average` once the amount exceeds
//!   `multiplier × average`.
//! - **Credit step**: a credit that steps up from the previous transaction by
//!   at least the configured threshold. Scores the threshold itself, which
//!   signals "pattern detected" rather than the size of the jump.

use crate::core::policy::ScoringPolicy;
use crate::types::{Amount, Direction, Score, Transaction};

/// Why a transaction received its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The transaction ID was already known; nothing was evaluated
    Duplicate,

    /// The account had no prior history to compare against
    ColdStart,

    /// Heuristics ran and found nothing unusual
    Clear,

    /// Debit above the account's baseline
    DebitMagnitude {
        /// `multiplier × average` the debit was compared against
        baseline: Amount,
    },

    /// Credit stepping up from the previous transaction
    CreditStep {
        /// Increase over the previous transaction
        step: Amount,
    },

    /// Qualifying credit step withheld by the step flag limit
    SuppressedStep {
        /// Length of the run of qualifying steps already in history
        run: usize,
    },
}

/// Score of one transaction along with the signal that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Non-negative suspicion score
    pub score: Score,

    /// The heuristic outcome behind `score`
    pub signal: Signal,
}

impl Assessment {
    /// Zero-score assessment
    pub fn unflagged(signal: Signal) -> Self {
        Self { score: 0, signal }
    }

    /// Whether any suspicion was detected
    pub fn is_flagged(&self) -> bool {
        self.score > 0
    }
}

/// Score a transaction against its account's prior history
///
/// `history` must hold the account's transactions in insertion order and must
/// not include `transaction` itself.
pub fn assess<'a, H>(policy: &ScoringPolicy, history: H, transaction: &Transaction) -> Assessment
where
    H: IntoIterator<Item = &'a Transaction>,
    H::IntoIter: DoubleEndedIterator,
{
    match transaction.direction() {
        Direction::Debit => debit_magnitude(history, transaction.amount, policy.debit_multiplier),
        Direction::Credit => credit_step(history, transaction.amount, policy),
    }
}

/// Integer mean of the amounts in `history`, rounded down
///
/// Returns `None` for an empty history.
pub fn average_amount<'a, H>(history: H) -> Option<Amount>
where
    H: IntoIterator<Item = &'a Transaction>,
{
    let (sum, count) = history
        .into_iter()
        .fold((0u128, 0u128), |(sum, count), tx| {
            (sum + u128::from(tx.amount), count + 1)
        });

    if count == 0 {
        return None;
    }

    // The mean never exceeds the largest amount, so it fits back into an Amount
    Some((sum / count) as Amount)
}

/// Debit magnitude heuristic
pub fn debit_magnitude<'a, H>(history: H, amount: Amount, multiplier: u64) -> Assessment
where
    H: IntoIterator<Item = &'a Transaction>,
{
    let Some(average) = average_amount(history) else {
        return Assessment::unflagged(Signal::ColdStart);
    };

    let baseline = average.saturating_mul(multiplier);
    if amount > baseline {
        Assessment {
            score: amount - baseline,
            signal: Signal::DebitMagnitude { baseline },
        }
    } else {
        Assessment::unflagged(Signal::Clear)
    }
}

/// Credit step heuristic
pub fn credit_step<'a, H>(history: H, amount: Amount, policy: &ScoringPolicy) -> Assessment
where
    H: IntoIterator<Item = &'a Transaction>,
    H::IntoIter: DoubleEndedIterator,
{
    let threshold = policy.credit_step_threshold;
    let mut newest_first = history.into_iter().rev();

    let Some(previous) = newest_first.next() else {
        return Assessment::unflagged(Signal::ColdStart);
    };

    let step = match amount.checked_sub(previous.amount) {
        Some(step) if step >= threshold => step,
        _ => return Assessment::unflagged(Signal::Clear),
    };

    if let Some(limit) = policy.step_flag_limit {
        let run = trailing_step_run(previous, newest_first, threshold);
        if run >= limit {
            return Assessment::unflagged(Signal::SuppressedStep { run });
        }
    }

    Assessment {
        score: threshold,
        signal: Signal::CreditStep { step },
    }
}

/// Count the qualifying credit steps that end the history
///
/// `newest` is the last transaction of the history and `earlier` yields the
/// remaining ones newest first.
fn trailing_step_run<'a, I>(newest: &'a Transaction, earlier: I, threshold: Amount) -> usize
where
    I: Iterator<Item = &'a Transaction>,
{
    let mut run = 0;
    let mut current = newest;

    for previous in earlier {
        let qualifies = !current.is_debit
            && current
                .amount
                .checked_sub(previous.amount)
                .is_some_and(|step| step >= threshold);
        if !qualifies {
            break;
        }
        run += 1;
        current = previous;
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn history(amounts: &[(Amount, bool)]) -> Vec<Transaction> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &(amount, is_debit))| Transaction::new(1, i as u32 + 1, amount, is_debit))
            .collect()
    }

    #[rstest]
    #[case::empty(&[], None)]
    #[case::single(&[(10, true)], Some(10))]
    #[case::rounds_down(&[(1, true), (1, false), (100, false)], Some(34))]
    #[case::large_values(&[(u64::MAX, false), (u64::MAX, true)], Some(u64::MAX))]
    fn test_average_amount(#[case] amounts: &[(Amount, bool)], #[case] expected: Option<Amount>) {
        assert_eq!(average_amount(&history(amounts)), expected);
    }

    #[rstest]
    #[case::far_above_baseline(1002, 934)]
    #[case::just_above_baseline(69, 1)]
    #[case::at_baseline(68, 0)]
    #[case::below_baseline(10, 0)]
    fn test_debit_magnitude(#[case] amount: Amount, #[case] expected: Score) {
        let h = history(&[(1, true), (1, false), (100, false)]);
        let assessment = debit_magnitude(&h, amount, 2);
        assert_eq!(assessment.score, expected);
        if expected > 0 {
            assert_eq!(assessment.signal, Signal::DebitMagnitude { baseline: 68 });
        } else {
            assert_eq!(assessment.signal, Signal::Clear);
        }
    }

    #[test]
    fn test_debit_score_grows_with_amount() {
        let h = history(&[(1, true), (1, false), (100, false)]);
        let base = debit_magnitude(&h, 500, 2).score;
        for extra in [1, 10, 1000] {
            assert_eq!(debit_magnitude(&h, 500 + extra, 2).score, base + extra);
        }
    }

    #[test]
    fn test_debit_multiplier_is_configurable() {
        let h = history(&[(100, false)]);
        assert_eq!(debit_magnitude(&h, 350, 3).score, 50);
        assert_eq!(debit_magnitude(&h, 300, 3).score, 0);
    }

    #[test]
    fn test_debit_baseline_saturates() {
        let h = history(&[(u64::MAX, false)]);
        assert_eq!(debit_magnitude(&h, u64::MAX, 2).score, 0);
    }

    #[rstest]
    #[case::exact_threshold(&[(120, false), (1500, false)], 2999, 1499)]
    #[case::above_threshold(&[(1500, false)], 3200, 1499)]
    #[case::below_threshold(&[(120, false)], 1500, 0)]
    #[case::decrease(&[(3200, false)], 450, 0)]
    #[case::step_from_debit(&[(10, true)], 2000, 1499)]
    fn test_credit_step(
        #[case] amounts: &[(Amount, bool)],
        #[case] amount: Amount,
        #[case] expected: Score,
    ) {
        let h = history(amounts);
        let assessment = credit_step(&h, amount, &ScoringPolicy::default());
        assert_eq!(assessment.score, expected);
    }

    #[test]
    fn test_credit_step_compares_against_last_transaction_only() {
        // A huge credit is not flagged when the previous amount is already high
        let h = history(&[(1000, false), (5000, true)]);
        let assessment = credit_step(&h, 6000, &ScoringPolicy::default());
        assert_eq!(assessment, Assessment::unflagged(Signal::Clear));
    }

    #[rstest]
    #[case::first_step(&[120, 1500], 2999, 1499)]
    #[case::second_step(&[120, 1500, 2999], 4498, 1499)]
    #[case::third_step_suppressed(&[120, 1500, 2999, 4498], 5997, 0)]
    #[case::run_broken(&[1500, 2999, 100], 1700, 1499)]
    fn test_step_flag_limit(
        #[case] amounts: &[Amount],
        #[case] amount: Amount,
        #[case] expected: Score,
    ) {
        let policy = ScoringPolicy {
            step_flag_limit: Some(2),
            ..ScoringPolicy::default()
        };
        let pairs: Vec<(Amount, bool)> = amounts.iter().map(|&a| (a, false)).collect();
        let h = history(&pairs);
        assert_eq!(credit_step(&h, amount, &policy).score, expected);
    }

    #[test]
    fn test_suppressed_step_reports_run_length() {
        let policy = ScoringPolicy {
            step_flag_limit: Some(1),
            ..ScoringPolicy::default()
        };
        let h = history(&[(0, false), (1500, false), (3000, false)]);
        assert_eq!(
            credit_step(&h, 4500, &policy),
            Assessment::unflagged(Signal::SuppressedStep { run: 2 })
        );
    }

    #[test]
    fn test_debit_breaks_step_run() {
        let policy = ScoringPolicy {
            step_flag_limit: Some(1),
            ..ScoringPolicy::default()
        };
        // The last history entry is a debit, so no run precedes the new credit
        let h = history(&[(0, false), (1500, true)]);
        assert_eq!(credit_step(&h, 3000, &policy).score, 1499);
    }

    #[rstest]
    #[case::debit(true)]
    #[case::credit(false)]
    fn test_empty_history_is_cold_start(#[case] is_debit: bool) {
        let tx = Transaction::new(1, 1, 1_000_000, is_debit);
        let empty: Vec<Transaction> = Vec::new();
        let assessment = assess(&ScoringPolicy::default(), &empty, &tx);
        assert_eq!(assessment, Assessment::unflagged(Signal::ColdStart));
        assert!(!assessment.is_flagged());
    }

    #[test]
    fn test_assess_dispatches_on_direction() {
        let h = history(&[(100, false)]);
        let policy = ScoringPolicy::default();

        // Same amount, different direction, different heuristic
        let debit = assess(&policy, &h, &Transaction::debit(1, 99, 2000));
        let credit = assess(&policy, &h, &Transaction::credit(1, 99, 2000));

        assert_eq!(debit.score, 1800);
        assert_eq!(credit.score, 1499);
        assert!(matches!(debit.signal, Signal::DebitMagnitude { .. }));
        assert!(matches!(credit.signal, Signal::CreditStep { step: 1900 }));
    }
}
