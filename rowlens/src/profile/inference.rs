//! Total value classification and single-pass column accumulation.
//!
//! Classification never relies on error control flow: [`classify_value`] is a
//! total function mapping every raw string to a tagged [`ValueClass`]. A
//! value counts as numeric only when it matches the decimal grammar and
//! parses to a finite `f64`, so `NaN`/`inf` spellings and overflowing
//! literals classify as text and the column they appear in becomes
//! Categorical.
//!
//! # Examples
//!
//! ```rust
//! use rowlens::profile::{classify_value, ValueClass};
//!
//! assert!(matches!(classify_value("3.14"), ValueClass::Numeric(_)));
//! assert!(matches!(classify_value("-2e3"), ValueClass::Numeric(_)));
//! assert!(matches!(classify_value(""), ValueClass::Missing));
//! assert!(matches!(classify_value("oat milk"), ValueClass::Text));
//! assert!(matches!(classify_value("NaN"), ValueClass::Text));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::is_missing;

use super::types::ValueCount;

/// Decimal grammar: optional sign, digits with optional fractional part (or
/// a bare fractional part), optional exponent. Deliberately narrower than
/// `f64::from_str`, which also accepts `inf`/`nan` spellings.
static DECIMAL_GRAMMAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// Classification of one raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueClass {
    /// Empty string; excluded from counts and parsing.
    Missing,
    /// Numeric-parseable, with the parsed finite value.
    Numeric(f64),
    /// Non-missing and not numeric-parseable.
    Text,
}

/// Classifies a single raw value.
///
/// Total over all inputs: every string maps to exactly one variant. A value
/// is `Numeric` iff it matches the decimal grammar and parses to a finite
/// `f64`; surrounding whitespace is not stripped.
pub fn classify_value(raw: &str) -> ValueClass {
    if is_missing(raw) {
        return ValueClass::Missing;
    }
    if !DECIMAL_GRAMMAR.is_match(raw) {
        return ValueClass::Text;
    }
    // Grammar matches can still overflow to infinity (e.g. "1e999").
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => ValueClass::Numeric(v),
        _ => ValueClass::Text,
    }
}

/// Returns true when a raw value would classify as `Numeric`.
pub fn is_numeric_parseable(raw: &str) -> bool {
    matches!(classify_value(raw), ValueClass::Numeric(_))
}

/// Decides whether a whole column is Numeric.
///
/// True iff the column has at least one non-missing value and every
/// non-missing value is numeric-parseable. Short-circuits on the first
/// text value.
pub fn column_is_numeric<'a>(values: impl IntoIterator<Item = &'a str>) -> bool {
    let mut saw_numeric = false;
    for raw in values {
        match classify_value(raw) {
            ValueClass::Missing => {}
            ValueClass::Numeric(_) => saw_numeric = true,
            ValueClass::Text => return false,
        }
    }
    saw_numeric
}

/// Streaming numeric accumulator (Welford's update for mean/variance,
/// direct comparison for min/max).
#[derive(Debug, Clone, Default)]
pub(crate) struct StreamingStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl StreamingStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.min = value;
            self.max = value;
        } else {
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
        }
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    pub(crate) fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub(crate) fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Sample standard deviation with Bessel's correction; absent below two
    /// observations.
    pub(crate) fn sample_std_dev(&self) -> Option<f64> {
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

/// Insertion-ordered value counter.
///
/// Counts accumulate in first-appearance order so that a stable sort by
/// descending count leaves equal-frequency values in the order they first
/// appeared, which is the tie-break contract for top values.
#[derive(Debug, Clone, Default)]
pub(crate) struct ValueCounts {
    entries: Vec<(String, u64)>,
    index: std::collections::HashMap<String, usize>,
}

impl ValueCounts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, value: &str) {
        if let Some(&slot) = self.index.get(value) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(value.to_string(), self.entries.len());
            self.entries.push((value.to_string(), 1));
        }
    }

    pub(crate) fn unique_count(&self) -> u64 {
        self.entries.len() as u64
    }

    /// All values ranked by descending count, first-appearance order for
    /// ties.
    pub(crate) fn ranked(self) -> Vec<ValueCount> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .map(|(value, count)| ValueCount { value, count })
            .collect()
    }
}

/// Single-pass accumulator over one column's raw values.
///
/// Tracks everything both summary kinds could need; the profiler decides
/// which summary to build once the pass is complete. Numeric accumulation
/// stops at the first text value, since the column is Categorical from that
/// point on.
#[derive(Debug, Default)]
pub(crate) struct ColumnScan {
    rows: u64,
    missing: u64,
    all_numeric: bool,
    stats: StreamingStats,
    values: Vec<f64>,
    counts: ValueCounts,
}

impl ColumnScan {
    pub(crate) fn new() -> Self {
        Self {
            all_numeric: true,
            ..Self::default()
        }
    }

    pub(crate) fn observe(&mut self, raw: &str) {
        self.rows += 1;
        match classify_value(raw) {
            ValueClass::Missing => self.missing += 1,
            ValueClass::Numeric(v) => {
                self.counts.record(raw);
                if self.all_numeric {
                    self.stats.push(v);
                    self.values.push(v);
                }
            }
            ValueClass::Text => {
                self.counts.record(raw);
                if self.all_numeric {
                    self.all_numeric = false;
                    self.values = Vec::new();
                }
            }
        }
    }

    /// Non-missing value count.
    pub(crate) fn count(&self) -> u64 {
        self.rows - self.missing
    }

    pub(crate) fn missing(&self) -> u64 {
        self.missing
    }

    /// True iff the column classifies Numeric: at least one non-missing
    /// value and no text values.
    pub(crate) fn is_numeric_column(&self) -> bool {
        self.all_numeric && self.count() > 0
    }

    pub(crate) fn numeric_stats(&self) -> &StreamingStats {
        &self.stats
    }

    /// Parsed values in row order; meaningful only for numeric columns.
    pub(crate) fn numeric_values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn into_counts(self) -> ValueCounts {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integers_and_floats() {
        for raw in ["0", "42", "-7", "+13", "3.14", "-0.5", ".5", "+.5", "5."] {
            assert!(is_numeric_parseable(raw), "expected numeric: {raw:?}");
        }
    }

    #[test]
    fn test_classify_exponent_forms() {
        for raw in ["1e5", "1E5", "2.5e-3", "-1.5E+2", ".5e2"] {
            assert!(is_numeric_parseable(raw), "expected numeric: {raw:?}");
        }
    }

    #[test]
    fn test_classify_rejects_text() {
        for raw in ["abc", "12a", "1.2.3", "1,000", "0x1F", "--1", "e5", "1e", "+"] {
            assert_eq!(classify_value(raw), ValueClass::Text, "input: {raw:?}");
        }
    }

    #[test]
    fn test_classify_rejects_surrounding_whitespace() {
        for raw in [" 1", "1 ", " 1 ", "\t2", "3\n"] {
            assert_eq!(classify_value(raw), ValueClass::Text, "input: {raw:?}");
        }
    }

    #[test]
    fn test_classify_rejects_non_finite_spellings() {
        for raw in ["NaN", "nan", "inf", "Inf", "-inf", "infinity", "Infinity"] {
            assert_eq!(classify_value(raw), ValueClass::Text, "input: {raw:?}");
        }
    }

    #[test]
    fn test_classify_rejects_overflow_to_infinity() {
        assert_eq!(classify_value("1e999"), ValueClass::Text);
        assert_eq!(classify_value("-1e999"), ValueClass::Text);
    }

    #[test]
    fn test_empty_string_is_missing_not_numeric() {
        assert_eq!(classify_value(""), ValueClass::Missing);
        assert!(!is_numeric_parseable(""));
    }

    #[test]
    fn test_column_is_numeric_rules() {
        assert!(column_is_numeric(["1", "2", "3"]));
        assert!(column_is_numeric(["1", "", "3"]));
        assert!(!column_is_numeric(["1", "2", "x"]));
        assert!(!column_is_numeric(["", ""]));
        assert!(!column_is_numeric(std::iter::empty()));
    }

    #[test]
    fn test_streaming_stats_textbook_vector() {
        let mut stats = StreamingStats::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(v);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean().unwrap() - 5.0).abs() < 1e-9);
        assert!((stats.min().unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((stats.max().unwrap() - 9.0).abs() < f64::EPSILON);
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((stats.sample_std_dev().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_streaming_stats_single_value() {
        let mut stats = StreamingStats::new();
        stats.push(42.0);
        assert_eq!(stats.mean(), Some(42.0));
        assert_eq!(stats.min(), Some(42.0));
        assert_eq!(stats.max(), Some(42.0));
        assert_eq!(stats.sample_std_dev(), None);
    }

    #[test]
    fn test_streaming_stats_empty() {
        let stats = StreamingStats::new();
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.sample_std_dev(), None);
    }

    #[test]
    fn test_value_counts_first_occurrence_ties() {
        let mut counts = ValueCounts::new();
        for v in ["b", "a", "b", "a", "c"] {
            counts.record(v);
        }
        assert_eq!(counts.unique_count(), 3);
        let ranked = counts.ranked();
        // "b" and "a" both have 2; "b" appeared first.
        assert_eq!(ranked[0].value, "b");
        assert_eq!(ranked[1].value, "a");
        assert_eq!(ranked[2].value, "c");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[2].count, 1);
    }

    #[test]
    fn test_column_scan_numeric_column() {
        let mut scan = ColumnScan::new();
        for raw in ["1", "", "2.5", "3"] {
            scan.observe(raw);
        }
        assert!(scan.is_numeric_column());
        assert_eq!(scan.count(), 3);
        assert_eq!(scan.missing(), 1);
        assert_eq!(scan.numeric_values(), &[1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_column_scan_flips_to_categorical() {
        let mut scan = ColumnScan::new();
        for raw in ["1", "2", "x", "3"] {
            scan.observe(raw);
        }
        assert!(!scan.is_numeric_column());
        assert_eq!(scan.count(), 4);
        assert!(scan.numeric_values().is_empty());
        let ranked = scan.into_counts().ranked();
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_column_scan_all_missing_is_not_numeric() {
        let mut scan = ColumnScan::new();
        scan.observe("");
        scan.observe("");
        assert!(!scan.is_numeric_column());
        assert_eq!(scan.count(), 0);
        assert_eq!(scan.into_counts().unique_count(), 0);
    }
}
