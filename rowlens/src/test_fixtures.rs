//! Common test fixtures for profiling scenarios.
//!
//! This module provides small pre-built tables used across the crate's own
//! tests. It is also available to downstream integration tests behind the
//! `test-utils` feature.

use crate::error::Result;
use crate::table::Table;

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Creates an ad-impressions table: two categorical key columns and one
/// numeric measure, with a missing click count on one row.
///
/// Groups by `page_id` split 3/2 between `p1` and `p2`.
pub fn sample_ads_table() -> Result<Table> {
    Table::new(
        row(&["page_id", "ad_type", "clicks"]),
        vec![
            row(&["p1", "banner", "3"]),
            row(&["p2", "video", "5"]),
            row(&["p1", "banner", "1"]),
            row(&["p1", "video", ""]),
            row(&["p2", "banner", "2"]),
        ],
    )
}

/// Creates a user directory with varied missing patterns for testing
/// completeness counting.
///
/// Per column: `id` is complete, `name` has 3 missing, `email` has 3,
/// `age` has 2, `score` has 3.
pub fn sample_users_table() -> Result<Table> {
    Table::new(
        row(&["id", "name", "email", "age", "score"]),
        vec![
            row(&["1", "Alice", "alice@example.com", "25", "85.5"]),
            row(&["2", "", "bob@example.com", "30", "92.0"]),
            row(&["3", "Charlie", "", "35", ""]),
            row(&["4", "David", "david@example.com", "40", "78.5"]),
            row(&["5", "", "eve@example.com", "", "88.0"]),
            row(&["6", "Frank", "", "28", "91.5"]),
            row(&["7", "Grace", "grace@example.com", "", "76.0"]),
            row(&["8", "", "henry@example.com", "33", ""]),
            row(&["9", "Ivan", "", "29", ""]),
            row(&["10", "Jane", "jane@example.com", "31", "83.5"]),
        ],
    )
}
