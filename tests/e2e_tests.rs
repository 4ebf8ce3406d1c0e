//! End-to-end integration tests
//!
//! These tests validate the complete scoring pipeline using predefined CSV
//! test fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Scores all transactions with the default policy
//! 3. Generates the score report
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Cold start accounts
//! - Debit magnitude scoring
//! - Credit step scoring
//! - Duplicate transaction ids
//! - Interleaved accounts
//! - Malformed records
//!
//! Each test is run twice: once with the sync strategy and once with the async strategy.

#[cfg(test)]
mod tests {
    use fraud_scoring_engine::cli::StrategyType;
    use fraud_scoring_engine::core::ScoringPolicy;
    use fraud_scoring_engine::strategy::{create_strategy, BatchConfig};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType, config: Option<BatchConfig>) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let strategy = create_strategy(strategy_type, ScoringPolicy::default(), config);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process transactions: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both processing strategies
    #[rstest]
    #[case("cold_start")]
    #[case("debit_magnitude")]
    #[case("credit_steps")]
    #[case("duplicate_transactions")]
    #[case("multiple_accounts")]
    #[case("malformed_data")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy, None);
    }

    /// Small batches split account histories and duplicates across batches
    #[rstest]
    #[case("credit_steps")]
    #[case("duplicate_transactions")]
    #[case("multiple_accounts")]
    fn test_fixtures_with_small_batches(#[case] fixture: &str, #[values(1, 2, 3)] batch_size: usize) {
        run_test_fixture(
            fixture,
            StrategyType::Async,
            Some(BatchConfig::new(batch_size, 2)),
        );
    }
}
