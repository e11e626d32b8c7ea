//! Per-column profiling over an in-memory table.
//!
//! The profiler walks each column once, classifies it as Numeric or
//! Categorical, and builds the matching summary: streaming mean/min/max,
//! sample standard deviation, and interpolated percentiles for numeric
//! columns; distinct counts and ranked top values for categorical ones.
//!
//! # Example
//!
//! ```rust
//! use rowlens::profile::ColumnProfiler;
//! use rowlens::table::Table;
//!
//! let table = Table::new(
//!     vec!["price".into()],
//!     vec![vec!["9.5".into()], vec!["12".into()], vec!["".into()]],
//! )?;
//!
//! let profiler = ColumnProfiler::builder().top_values(5).build();
//! let profile = profiler.profile_table(&table)?;
//!
//! assert!(profile.column("price").unwrap().is_numeric());
//! # Ok::<(), rowlens::error::ProfileError>(())
//! ```

use tracing::{debug, instrument};

use crate::error::{ProfileError, Result};
use crate::table::Table;

use super::inference::ColumnScan;
use super::types::{
    CategoricalSummary, ColumnKind, ColumnProfile, NumericSummary, PercentilePoint, TableProfile,
};

/// Quantiles reported by default: 10%, 25%, 50%, 75%, 90%.
pub const DEFAULT_PERCENTILES: &[f64] = &[0.1, 0.25, 0.5, 0.75, 0.9];

/// Default number of top categorical values to report.
pub const DEFAULT_TOP_VALUES: usize = 5;

/// Configuration for the column profiler.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Maximum entries in each categorical top-value list.
    pub top_values: usize,
    /// Quantiles for numeric summaries; each must lie in (0, 1].
    pub percentiles: Vec<f64>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_values: DEFAULT_TOP_VALUES,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
        }
    }
}

impl ProfilerConfig {
    fn validate(&self) -> Result<()> {
        for &q in &self.percentiles {
            if !(q > 0.0 && q <= 1.0) {
                return Err(ProfileError::configuration(format!(
                    "percentile quantile {q} outside (0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`ColumnProfiler`].
#[derive(Debug, Default)]
pub struct ColumnProfilerBuilder {
    config: ProfilerConfig,
}

impl ColumnProfilerBuilder {
    /// Sets the top-K size for categorical value lists.
    pub fn top_values(mut self, top_values: usize) -> Self {
        self.config.top_values = top_values;
        self
    }

    /// Replaces the reported quantiles.
    pub fn percentiles(mut self, quantiles: &[f64]) -> Self {
        self.config.percentiles = quantiles.to_vec();
        self
    }

    /// Builds the profiler with the accumulated configuration.
    pub fn build(self) -> ColumnProfiler {
        ColumnProfiler {
            config: self.config,
        }
    }
}

/// Profiles table columns into [`ColumnProfile`] snapshots.
///
/// Stateless between calls: profiling the same table twice yields identical
/// results.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnProfiler {
    /// Creates a profiler with default configuration.
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    /// Creates a profiler from an explicit configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Starts building a profiler.
    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder::default()
    }

    /// Profiles every column of the table, in header order.
    #[instrument(skip(self, table), fields(table.rows = table.row_count(), table.columns = table.column_count()))]
    pub fn profile_table(&self, table: &Table) -> Result<TableProfile> {
        self.config.validate()?;
        let columns = table
            .headers()
            .iter()
            .enumerate()
            .map(|(idx, name)| self.profile_at(table, idx, name))
            .collect::<Vec<_>>();
        debug!(columns = columns.len(), "profiled table");
        Ok(TableProfile {
            row_count: table.row_count() as u64,
            column_count: table.column_count() as u64,
            columns,
        })
    }

    /// Profiles a single column by name.
    ///
    /// Returns [`ProfileError::MissingColumns`] when the name is absent.
    #[instrument(skip(self, table), fields(column.name = %name))]
    pub fn profile_column(&self, table: &Table, name: &str) -> Result<ColumnProfile> {
        self.config.validate()?;
        let idx = table
            .column_index(name)
            .ok_or_else(|| ProfileError::missing_columns([name]))?;
        Ok(self.profile_at(table, idx, name))
    }

    fn profile_at(&self, table: &Table, idx: usize, name: &str) -> ColumnProfile {
        let mut scan = ColumnScan::new();
        for raw in table.column_values(idx) {
            scan.observe(raw);
        }

        let count = scan.count();
        let missing = scan.missing();

        let numeric = if scan.is_numeric_column() {
            let stats = scan.numeric_stats();
            match (stats.mean(), stats.min(), stats.max()) {
                (Some(mean), Some(min), Some(max)) => {
                    let mut sorted = scan.numeric_values().to_vec();
                    sorted.sort_by(f64::total_cmp);
                    let percentiles = self
                        .config
                        .percentiles
                        .iter()
                        .map(|&q| PercentilePoint {
                            quantile: q,
                            value: percentile_from_sorted(&sorted, q),
                        })
                        .collect();
                    Some(NumericSummary {
                        mean,
                        min,
                        max,
                        std_dev: stats.sample_std_dev(),
                        percentiles,
                    })
                }
                _ => None,
            }
        } else {
            None
        };

        if let Some(numeric) = numeric {
            ColumnProfile {
                name: name.to_string(),
                count,
                missing,
                kind: ColumnKind::Numeric,
                numeric: Some(numeric),
                categorical: None,
            }
        } else {
            let counts = scan.into_counts();
            let unique_count = counts.unique_count();
            let mut top_values = counts.ranked();
            top_values.truncate(self.config.top_values);
            ColumnProfile {
                name: name.to_string(),
                count,
                missing,
                kind: ColumnKind::Categorical,
                numeric: None,
                categorical: Some(CategoricalSummary {
                    unique_count,
                    top_values,
                }),
            }
        }
    }
}

/// Linear interpolation between the two nearest ranks of a sorted slice.
fn percentile_from_sorted(sorted_values: &[f64], quantile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    let position = quantile * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let fraction = position - lower as f64;
        sorted_values[lower] + fraction * (sorted_values[upper] - sorted_values[lower])
    }
}
