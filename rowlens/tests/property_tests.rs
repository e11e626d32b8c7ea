//! Property-based tests for the rowlens profiling library.
//!
//! This module uses proptest to verify profiling behavior across a wide
//! range of inputs, including edge cases and boundary conditions.
//!
//! ## Test Categories
//!
//! ### 1. Value Classification
//! - Numeric tokens always classify as numeric, text always as categorical
//! - A single text value anywhere in a column forces the column categorical
//!
//! ### 2. Numeric Summaries
//! - Streaming mean/min/max/std dev match an independent two-pass
//!   computation
//! - Percentiles stay within the observed value range
//!
//! ### 3. Counting
//! - Non-missing and missing counts partition the row count exactly
//! - Categorical top values are ranked by frequency and bounded by the
//!   non-missing count
//!
//! ### 4. Grouping
//! - Groups partition the table: every row lands in exactly one group
//! - Missing key values collapse into the `NA` sentinel group
//! - Ranked groups have non-increasing sizes and honor top-N truncation
//!
//! ### 5. Determinism
//! - Profiling the same table twice yields identical results

use proptest::prelude::*;
use rowlens::profile::{
    classify_value, column_is_numeric, ColumnProfiler, GroupBy, GroupKey, ValueClass,
    MISSING_GROUP_VALUE,
};
use rowlens::table::Table;

// ============================================================================
// Test Data Generation Utilities
// ============================================================================

/// Builds a one-column table from raw cell values.
fn single_column(name: &str, values: Vec<String>) -> Table {
    let rows = values.into_iter().map(|v| vec![v]).collect();
    Table::new(vec![name.to_string()], rows).unwrap()
}

/// Builds a two-column table of group keys and numeric measures.
fn keyed_table(rows: &[(Option<u8>, f64)]) -> Table {
    let data = rows
        .iter()
        .map(|(key, value)| {
            vec![
                key.map(|k| format!("g{k}")).unwrap_or_default(),
                format!("{value}"),
            ]
        })
        .collect();
    Table::new(vec!["k".to_string(), "v".to_string()], data).unwrap()
}

/// Strategy for one raw cell: missing, numeric, or text.
fn cell_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => (-1000f64..1000f64).prop_map(|v| format!("{v}")),
        2 => "[a-z]{1,6}",
    ]
}

// ============================================================================
// Property Tests for Value Classification
// ============================================================================

proptest! {
    /// Any finite float formatted with `Display` must classify as numeric
    /// and parse back to the same value.
    #[test]
    fn test_numeric_tokens_classify_numeric(value in -1.0e6f64..1.0e6f64) {
        let token = format!("{value}");
        match classify_value(&token) {
            ValueClass::Numeric(parsed) => prop_assert_eq!(parsed, value),
            other => prop_assert!(false, "token {:?} classified as {:?}", token, other),
        }
    }

    /// A single non-numeric token anywhere in the column makes the whole
    /// column categorical, no matter how many numeric values surround it.
    #[test]
    fn test_text_token_forces_categorical(
        numbers in prop::collection::vec(-1000f64..1000f64, 0..30),
        text in "[a-z]{1,8}",
        position in 0usize..31,
    ) {
        let mut tokens: Vec<String> = numbers.iter().map(|v| format!("{v}")).collect();
        let at = position.min(tokens.len());
        tokens.insert(at, text);

        prop_assert!(!column_is_numeric(tokens.iter().map(String::as_str)));

        let table = single_column("v", tokens);
        let profile = ColumnProfiler::new().profile_table(&table).unwrap();
        prop_assert!(profile.columns[0].categorical.is_some());
        prop_assert!(profile.columns[0].numeric.is_none());
    }
}

// ============================================================================
// Property Tests for Numeric Summaries
// ============================================================================

proptest! {
    /// Properties tested:
    /// - Streaming mean matches the naive sum / n within tolerance
    /// - Min and max are exact
    /// - Sample standard deviation matches the two-pass n-1 formula
    #[test]
    fn test_numeric_summary_matches_naive_computation(
        values in prop::collection::vec(-1000f64..1000f64, 2..200)
    ) {
        let tokens: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
        let table = single_column("v", tokens);
        let profile = ColumnProfiler::new().profile_table(&table).unwrap();
        let numeric = profile.columns[0].numeric.as_ref().unwrap();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(
            (numeric.mean - mean).abs() < 1e-6 * (1.0 + mean.abs()),
            "mean {} vs naive {}", numeric.mean, mean
        );
        prop_assert_eq!(numeric.min, min);
        prop_assert_eq!(numeric.max, max);

        let std_dev = numeric.std_dev.unwrap();
        let naive_std_dev = variance.sqrt();
        prop_assert!(
            (std_dev - naive_std_dev).abs() < 1e-6 * (1.0 + naive_std_dev),
            "std dev {} vs naive {}", std_dev, naive_std_dev
        );
    }

    /// Every reported percentile lies within the observed value range, and
    /// the 100th percentile is exactly the maximum.
    #[test]
    fn test_percentiles_within_observed_range(
        values in prop::collection::vec(-1000f64..1000f64, 1..100),
        quantile in 0.01f64..=1.0f64,
    ) {
        let tokens: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
        let table = single_column("v", tokens);
        let profiler = ColumnProfiler::builder().percentiles(&[quantile, 1.0]).build();
        let profile = profiler.profile_table(&table).unwrap();
        let numeric = profile.columns[0].numeric.as_ref().unwrap();

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let point = numeric.percentiles[0].value;
        prop_assert!(point >= min - 1e-9 && point <= max + 1e-9,
            "percentile {} outside [{}, {}]", point, min, max);
        prop_assert_eq!(numeric.percentiles[1].value, max);
    }
}

// ============================================================================
// Property Tests for Counting
// ============================================================================

proptest! {
    /// Non-missing plus missing always equals the row count, regardless of
    /// how the column classifies.
    #[test]
    fn test_missing_and_count_partition_rows(
        cells in prop::collection::vec(cell_strategy(), 1..150)
    ) {
        let empties = cells.iter().filter(|c| c.is_empty()).count() as u64;
        let table = single_column("v", cells);
        let profile = ColumnProfiler::new().profile_table(&table).unwrap();
        let column = &profile.columns[0];

        prop_assert_eq!(column.missing, empties);
        prop_assert_eq!(column.count + column.missing, profile.row_count);
    }

    /// Properties tested:
    /// - Top-value counts are non-increasing
    /// - With an unbounded top list, the counts sum to the non-missing count
    ///   and the list length equals the unique count
    #[test]
    fn test_top_values_ranked_and_complete(
        values in prop::collection::vec(0u8..8u8, 1..100)
    ) {
        let tokens: Vec<String> = values.iter().map(|v| format!("v{v}")).collect();
        let table = single_column("c", tokens);
        let profiler = ColumnProfiler::builder().top_values(usize::MAX).build();
        let profile = profiler.profile_table(&table).unwrap();
        let categorical = profile.columns[0].categorical.as_ref().unwrap();

        for pair in categorical.top_values.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        let total: u64 = categorical.top_values.iter().map(|vc| vc.count).sum();
        prop_assert_eq!(total, profile.columns[0].count);
        prop_assert_eq!(categorical.top_values.len() as u64, categorical.unique_count);
    }
}

// ============================================================================
// Property Tests for Grouping
// ============================================================================

proptest! {
    /// Properties tested:
    /// - Group sizes sum to the table's row count
    /// - Every row index appears in exactly one group
    #[test]
    fn test_groups_partition_rows(
        rows in prop::collection::vec((prop::option::of(0u8..5u8), -100f64..100f64), 1..200)
    ) {
        let table = keyed_table(&rows);
        let partition = GroupBy::new(["k"]).partition(&table).unwrap();

        let total: usize = partition.groups().iter().map(|g| g.size()).sum();
        prop_assert_eq!(total, table.row_count());

        let mut seen = vec![false; table.row_count()];
        for group in partition.groups() {
            for &idx in group.row_indices() {
                prop_assert!(!seen[idx], "row {} appears in two groups", idx);
                seen[idx] = true;
            }
        }
        prop_assert!(seen.into_iter().all(|s| s));
    }

    /// Missing key cells all collapse into a single sentinel group whose
    /// size equals the number of missing cells.
    #[test]
    fn test_missing_keys_collapse_to_sentinel(
        rows in prop::collection::vec((prop::option::of(0u8..3u8), -100f64..100f64), 1..100)
    ) {
        let missing = rows.iter().filter(|(key, _)| key.is_none()).count();
        let table = keyed_table(&rows);
        let partition = GroupBy::new(["k"]).partition(&table).unwrap();

        let sentinel = GroupKey(vec![MISSING_GROUP_VALUE.to_string()]);
        match partition.get(&sentinel) {
            Some(group) => prop_assert_eq!(group.size(), missing),
            None => prop_assert_eq!(missing, 0),
        }
    }

    /// Properties tested:
    /// - Reported group sizes are non-increasing
    /// - The report never holds more than top-N groups
    /// - The truncated flag is set exactly when groups were dropped
    #[test]
    fn test_ranked_groups_sizes_non_increasing(
        keys in prop::collection::vec(0u8..10u8, 1..200),
        top_n in 1usize..12,
    ) {
        let distinct = {
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len()
        };
        let tokens: Vec<String> = keys.iter().map(|k| format!("g{k}")).collect();
        let table = single_column("k", tokens);

        let report = GroupBy::new(["k"]).with_top_n(top_n).profile(&table).unwrap();

        prop_assert_eq!(report.total_groups, distinct);
        prop_assert_eq!(report.top_groups.len(), distinct.min(top_n));
        prop_assert_eq!(report.truncated, distinct > top_n);
        for pair in report.top_groups.windows(2) {
            prop_assert!(pair[0].size >= pair[1].size);
        }
    }
}

// ============================================================================
// Property Tests for Determinism
// ============================================================================

proptest! {
    /// The same table always profiles to the same report, whatever mix of
    /// missing, numeric, and text cells it holds.
    #[test]
    fn test_profiling_deterministic(
        cells in prop::collection::vec(cell_strategy(), 0..100)
    ) {
        let rows: Vec<Vec<String>> = cells.iter().map(|c| vec![c.clone()]).collect();
        let table = Table::new(vec!["v".to_string()], rows).unwrap();

        let profiler = ColumnProfiler::new();
        let first = profiler.profile_table(&table).unwrap();
        let second = profiler.profile_table(&table).unwrap();
        prop_assert_eq!(first, second);

        let grouper = GroupBy::new(["v"]);
        prop_assert_eq!(grouper.profile(&table).unwrap(), grouper.profile(&table).unwrap());
    }
}

// ============================================================================
// Edge Case and Boundary Tests
// ============================================================================

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_empty_table_profiles_cleanly() {
        let table = Table::new(vec!["a".to_string(), "b".to_string()], Vec::new()).unwrap();
        let profile = ColumnProfiler::new().profile_table(&table).unwrap();

        assert_eq!(profile.row_count, 0);
        assert_eq!(profile.columns.len(), 2);
        for column in &profile.columns {
            assert_eq!(column.count, 0);
            assert_eq!(column.missing, 0);
            // No values means no numeric evidence
            assert!(column.numeric.is_none());
        }
    }

    #[test]
    fn test_all_missing_column_is_categorical() {
        let table = single_column("v", vec![String::new(), String::new(), String::new()]);
        let profile = ColumnProfiler::new().profile_table(&table).unwrap();
        let column = &profile.columns[0];

        assert_eq!(column.count, 0);
        assert_eq!(column.missing, 3);
        let categorical = column.categorical.as_ref().unwrap();
        assert_eq!(categorical.unique_count, 0);
        assert!(categorical.top_values.is_empty());
    }

    #[test]
    fn test_zero_top_values_keeps_empty_list() {
        let table = single_column("v", vec!["a".to_string(), "b".to_string()]);
        let profiler = ColumnProfiler::builder().top_values(0).build();
        let profile = profiler.profile_table(&table).unwrap();
        let categorical = profile.columns[0].categorical.as_ref().unwrap();

        assert_eq!(categorical.unique_count, 2);
        assert!(categorical.top_values.is_empty());
    }

    #[test]
    fn test_single_group_is_never_truncated() {
        let table = single_column("k", vec!["x".to_string(); 50]);
        let report = GroupBy::new(["k"]).with_top_n(1).profile(&table).unwrap();

        assert_eq!(report.total_groups, 1);
        assert!(!report.truncated);
        assert_eq!(report.top_groups[0].size, 50);
    }
}
