//! Column profiling and group-by analysis.
//!
//! This module holds the statistical core of the crate. Everything here is a
//! pure function of an in-memory [`Table`](crate::table::Table) plus
//! configuration: no I/O, no shared state, and identical results on repeated
//! calls.
//!
//! ## Pieces
//!
//! - **Type inference** (`inference`): total per-value classification into
//!   missing / numeric / text, and the column-level Numeric-vs-Categorical
//!   decision built on it.
//! - **Column profiler** (`column`): streaming mean/min/max, sample
//!   standard deviation, and interpolated percentiles for numeric columns;
//!   distinct counts and ranked top values for categorical ones.
//! - **Group-by** (`groupby`): exact partitioning by one or more key
//!   columns with an `"NA"` sentinel for missing key parts, size-ranked
//!   group reporting, and per-group aggregates over the table's numeric
//!   columns.
//!
//! ## Example
//!
//! ```rust
//! use rowlens::profile::{ColumnProfiler, GroupBy};
//! use rowlens::table::Table;
//!
//! let table = Table::new(
//!     vec!["page".into(), "clicks".into()],
//!     vec![
//!         vec!["home".into(), "3".into()],
//!         vec!["docs".into(), "5".into()],
//!         vec!["home".into(), "".into()],
//!     ],
//! )?;
//!
//! let profile = ColumnProfiler::new().profile_table(&table)?;
//! assert_eq!(profile.numeric_columns(), vec!["clicks"]);
//!
//! let groups = GroupBy::new(["page"]).profile(&table)?;
//! assert_eq!(groups.top_groups[0].size, 2);
//! # Ok::<(), rowlens::error::ProfileError>(())
//! ```

pub mod column;
pub mod groupby;
pub mod inference;
pub mod types;

pub use column::{
    ColumnProfiler, ColumnProfilerBuilder, ProfilerConfig, DEFAULT_PERCENTILES, DEFAULT_TOP_VALUES,
};
pub use groupby::{
    ColumnAggregate, Group, GroupBy, GroupByProfile, GroupKey, GroupSummary, Partition,
    DEFAULT_TOP_GROUPS, MISSING_GROUP_VALUE,
};
pub use inference::{classify_value, column_is_numeric, is_numeric_parseable, ValueClass};
pub use types::{
    CategoricalSummary, ColumnKind, ColumnProfile, NumericSummary, PercentilePoint, TableProfile,
    ValueCount,
};
