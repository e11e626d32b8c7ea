//! Result types produced by the column profiler.
//!
//! These are plain serde-friendly snapshots; nothing here borrows from the
//! source table, so reports can outlive it and serialize directly.

use serde::{Deserialize, Serialize};

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-missing value parses as a finite 64-bit float.
    Numeric,
    /// Anything else, including columns with no non-missing values.
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "Numeric"),
            ColumnKind::Categorical => write!(f, "Categorical"),
        }
    }
}

/// One interpolated percentile of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentilePoint {
    /// Quantile in (0, 1], e.g. 0.25 for the 25th percentile.
    pub quantile: f64,
    pub value: f64,
}

impl PercentilePoint {
    /// Human label for the quantile, e.g. `"25%"` or `"2.5%"`.
    pub fn label(&self) -> String {
        let pct = self.quantile * 100.0;
        if (pct - pct.round()).abs() < 1e-9 {
            format!("{:.0}%", pct)
        } else {
            format!("{}%", pct)
        }
    }
}

/// Descriptive statistics for a Numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (Bessel's correction). Absent when the
    /// column has fewer than two numeric values.
    pub std_dev: Option<f64>,
    /// Interpolated percentiles, in the order they were requested.
    pub percentiles: Vec<PercentilePoint>,
}

impl NumericSummary {
    /// Looks up a percentile value by quantile.
    pub fn percentile(&self, quantile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| (p.quantile - quantile).abs() < 1e-9)
            .map(|p| p.value)
    }
}

/// One distinct value and its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

impl ValueCount {
    /// Share of the column's non-missing values, as a percentage.
    pub fn percentage(&self, non_missing: u64) -> f64 {
        if non_missing == 0 {
            0.0
        } else {
            self.count as f64 / non_missing as f64 * 100.0
        }
    }
}

/// Frequency summary for a Categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Distinct non-missing values (exact match, case-sensitive).
    pub unique_count: u64,
    /// Most frequent values, descending by count; equal counts keep the
    /// order in which the value first appeared in the rows.
    pub top_values: Vec<ValueCount>,
}

/// Complete profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Non-missing value count.
    pub count: u64,
    /// Rows minus `count`.
    pub missing: u64,
    pub kind: ColumnKind,
    /// Present exactly when `kind` is Numeric.
    pub numeric: Option<NumericSummary>,
    /// Present exactly when `kind` is Categorical.
    pub categorical: Option<CategoricalSummary>,
}

impl ColumnProfile {
    /// Total rows the column was profiled over.
    pub fn row_count(&self) -> u64 {
        self.count + self.missing
    }

    /// Missing values as a percentage of all rows (0 for an empty table).
    pub fn missing_percentage(&self) -> f64 {
        let rows = self.row_count();
        if rows == 0 {
            0.0
        } else {
            self.missing as f64 / rows as f64 * 100.0
        }
    }

    /// Returns true for Numeric columns.
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// Profiles for every column of a table, in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub row_count: u64,
    pub column_count: u64,
    pub columns: Vec<ColumnProfile>,
}

impl TableProfile {
    /// Looks up a column profile by name (first match for duplicates).
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the columns classified Numeric, in header order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }
}
