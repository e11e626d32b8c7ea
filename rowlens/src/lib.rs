//! # Rowlens - Column Profiling for CSV Data
//!
//! Rowlens profiles delimited datasets column by column: it classifies each
//! column as numeric or categorical, summarizes it accordingly, and can break
//! a table down by one or more key columns to report the largest groups with
//! per-group numeric aggregates.
//!
//! ## Overview
//!
//! Point rowlens at a CSV file (or hand it an in-memory table) and it
//! produces a [`TableProfile`](profile::TableProfile): per-column counts,
//! missing-value tallies, mean/min/max/standard deviation with configurable
//! percentiles for numeric columns, and unique counts with the most frequent
//! values for categorical ones. Grouping requests produce ranked
//! [`GroupByProfile`](profile::GroupByProfile)s on top of the same table.
//! Everything is deterministic: the same input always yields the same
//! profile, with ties broken by first appearance.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowlens::prelude::*;
//!
//! # fn main() -> rowlens::error::Result<()> {
//! let table = Table::new(
//!     vec!["city".into(), "price".into()],
//!     vec![
//!         vec!["austin".into(), "1.5".into()],
//!         vec!["boston".into(), "2.5".into()],
//!         vec!["austin".into(), String::new()],
//!     ],
//! )?;
//!
//! let profile = ColumnProfiler::new().profile_table(&table)?;
//! for column in &profile.columns {
//!     println!("{}: {} ({} missing)", column.name, column.kind, column.missing);
//! }
//!
//! let groups = GroupBy::new(["city"]).profile(&table)?;
//! println!("{} city groups", groups.total_groups);
//! # Ok(())
//! # }
//! ```
//!
//! ## Profiling Files
//!
//! The [`Runner`](runner::Runner) drives whole profiling runs over CSV
//! files, containing failures per dataset so one bad file does not abort
//! the rest:
//!
//! ```rust,no_run
//! use rowlens::formatters::{HumanFormatter, ReportFormatter};
//! use rowlens::runner::{DatasetSpec, RunConfig, Runner};
//!
//! # fn main() -> rowlens::error::Result<()> {
//! let config = RunConfig::new()
//!     .add_dataset(DatasetSpec::new("ads.csv").with_group_by(["page_id"]))
//!     .add_dataset(DatasetSpec::new("users.csv"));
//!
//! let summary = Runner::new().run(&config)?;
//! let formatter = HumanFormatter::new();
//! for report in summary.reports() {
//!     println!("{}", formatter.format(report)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! - **Column classification**: A total decision per column, numeric or
//!   categorical, with no exceptions driving control flow
//! - **Missing-value handling**: Empty fields count as missing everywhere
//!   and never contaminate statistics
//! - **Numeric summaries**: Mean, min, max, sample standard deviation, and
//!   linearly interpolated percentiles
//! - **Categorical summaries**: Unique counts and ranked top values
//! - **Group reports**: Multi-column keys, a missing-key sentinel, ranked
//!   group sizes, and per-group aggregates
//! - **Output formats**: Human-readable, JSON, and Markdown formatters
//!
//! ## Architecture
//!
//! - **`table`**: The in-memory table of raw string cells
//! - **`profile`**: Classification, column profiling, and group-by reporting
//! - **`sources`**: CSV loading
//! - **`runner`**: The driver that profiles configured datasets and collects
//!   failures
//! - **`formatters`**: Report rendering
//! - **`logging`**: `tracing` subscriber setup for binaries
//!
//! ## Examples
//!
//! See the `demos` directory for complete examples:
//!
//! - `basic_profile.rs`: Profile a single table and print the summary
//! - `grouped_report.rs`: Group a dataset and render every output format

pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod profile;
pub mod runner;
pub mod sources;
pub mod table;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
