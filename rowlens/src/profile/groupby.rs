//! Group-by partitioning and ranked group reporting.
//!
//! Rows partition into groups keyed by the values of the grouping columns,
//! with a fixed sentinel standing in for missing values. Groups accumulate
//! in first-appearance order, which doubles as the tie-break when ranking
//! groups of equal size.
//!
//! # Example
//!
//! ```rust
//! use rowlens::profile::GroupBy;
//! use rowlens::table::Table;
//!
//! let table = Table::new(
//!     vec!["page".into(), "clicks".into()],
//!     vec![
//!         vec!["home".into(), "3".into()],
//!         vec!["docs".into(), "5".into()],
//!         vec!["home".into(), "1".into()],
//!     ],
//! )?;
//!
//! let report = GroupBy::new(["page"]).with_top_n(5).profile(&table)?;
//! assert_eq!(report.total_groups, 2);
//! assert_eq!(report.top_groups[0].key.to_string(), "home");
//! # Ok::<(), rowlens::error::ProfileError>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ProfileError, Result};
use crate::table::{is_missing, Table};

use super::inference::{classify_value, column_is_numeric, StreamingStats, ValueClass};

/// Sentinel substituted for missing values in group keys.
pub const MISSING_GROUP_VALUE: &str = "NA";

/// Default number of top groups to report.
pub const DEFAULT_TOP_GROUPS: usize = 5;

/// Key identifying one group: the grouping columns' values for its rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    /// The key's components, one per grouping column.
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            write!(f, "({})", self.0.join(", "))
        }
    }
}

/// One group of rows sharing a key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    key: GroupKey,
    rows: Vec<usize>,
}

impl Group {
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Number of member rows.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Member row indices into the source table, in row order.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }
}

/// The complete partition of a table's rows.
///
/// Invariant: every row index appears in exactly one group, so group sizes
/// sum to the table's row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    groups: Vec<Group>,
}

impl Partition {
    /// Groups in first-appearance order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Sum of all group sizes.
    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(Group::size).sum()
    }

    /// Looks up a group by key.
    pub fn get(&self, key: &GroupKey) -> Option<&Group> {
        self.groups.iter().find(|g| &g.key == key)
    }

    /// Groups ranked by size descending; equal sizes keep first-appearance
    /// order (stable sort).
    pub fn ranked(&self) -> Vec<&Group> {
        let mut ranked: Vec<&Group> = self.groups.iter().collect();
        ranked.sort_by(|a, b| b.size().cmp(&a.size()));
        ranked
    }
}

/// Per-group aggregate of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAggregate {
    pub column: String,
    /// Non-missing values of this column within the group.
    pub count: u64,
    /// Absent when the group has no non-missing values for the column.
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One reported group: key, size, and optional numeric aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub size: u64,
    /// Aggregates per table-wide numeric column, in header order. Empty
    /// when aggregates were not requested.
    pub aggregates: Vec<ColumnAggregate>,
}

/// Ranked group report for one grouping request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByProfile {
    pub group_columns: Vec<String>,
    pub total_groups: usize,
    /// The largest groups, size descending, at most `top_n` of them.
    pub top_groups: Vec<GroupSummary>,
    /// True when `total_groups` exceeded `top_n`.
    pub truncated: bool,
}

/// Group-by operation over one or more grouping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    columns: Vec<String>,
    top_n: usize,
    include_aggregates: bool,
}

impl GroupBy {
    /// Creates a group-by over the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            top_n: DEFAULT_TOP_GROUPS,
            include_aggregates: true,
        }
    }

    /// Sets how many of the largest groups to report.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enables or disables the per-group numeric aggregate table.
    pub fn with_aggregates(mut self, include: bool) -> Self {
        self.include_aggregates = include;
        self
    }

    /// The grouping column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Resolves the grouping columns against the table's headers.
    ///
    /// Returns [`ProfileError::MissingColumns`] naming every absent column,
    /// or [`ProfileError::Configuration`] for an empty column list.
    fn resolve_columns(&self, table: &Table) -> Result<Vec<usize>> {
        if self.columns.is_empty() {
            return Err(ProfileError::configuration(
                "group-by requires at least one grouping column",
            ));
        }
        let absent: Vec<String> = self
            .columns
            .iter()
            .filter(|name| table.column_index(name).is_none())
            .cloned()
            .collect();
        if !absent.is_empty() {
            return Err(ProfileError::MissingColumns { columns: absent });
        }
        Ok(self
            .columns
            .iter()
            .filter_map(|name| table.column_index(name))
            .collect())
    }

    /// Partitions the table's rows into groups.
    ///
    /// No partition is computed when any grouping column is absent.
    #[instrument(skip(self, table), fields(group.columns = ?self.columns, table.rows = table.row_count()))]
    pub fn partition(&self, table: &Table) -> Result<Partition> {
        let indexes = self.resolve_columns(table)?;

        let mut groups: Vec<Group> = Vec::new();
        let mut lookup: HashMap<GroupKey, usize> = HashMap::new();
        for row in 0..table.row_count() {
            let key = GroupKey(
                indexes
                    .iter()
                    .map(|&idx| {
                        let raw = table.value(row, idx).unwrap_or_default();
                        if is_missing(raw) {
                            MISSING_GROUP_VALUE.to_string()
                        } else {
                            raw.to_string()
                        }
                    })
                    .collect(),
            );
            match lookup.get(&key) {
                Some(&slot) => groups[slot].rows.push(row),
                None => {
                    lookup.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }

        debug!(groups = groups.len(), "partitioned rows");
        Ok(Partition { groups })
    }

    /// Partitions, ranks, and summarizes the table's groups.
    ///
    /// When aggregates are enabled, every column classified Numeric over the
    /// entire table contributes per-group count/mean/min/max, grouping
    /// columns included.
    #[instrument(skip(self, table), fields(group.columns = ?self.columns, top_n = self.top_n))]
    pub fn profile(&self, table: &Table) -> Result<GroupByProfile> {
        let partition = self.partition(table)?;
        let total_groups = partition.group_count();

        let numeric_columns: Vec<(usize, &String)> = if self.include_aggregates {
            table
                .headers()
                .iter()
                .enumerate()
                .filter(|(idx, _)| column_is_numeric(table.column_values(*idx)))
                .collect()
        } else {
            Vec::new()
        };

        let top_groups = partition
            .ranked()
            .into_iter()
            .take(self.top_n)
            .map(|group| {
                let aggregates = numeric_columns
                    .iter()
                    .map(|&(idx, name)| aggregate_column(table, group, idx, name))
                    .collect();
                GroupSummary {
                    key: group.key().clone(),
                    size: group.size() as u64,
                    aggregates,
                }
            })
            .collect();

        Ok(GroupByProfile {
            group_columns: self.columns.clone(),
            total_groups,
            top_groups,
            truncated: total_groups > self.top_n,
        })
    }
}

/// Aggregates one numeric column over one group's rows.
fn aggregate_column(table: &Table, group: &Group, idx: usize, name: &str) -> ColumnAggregate {
    let mut stats = StreamingStats::new();
    for &row in group.row_indices() {
        if let Some(raw) = table.value(row, idx) {
            if let ValueClass::Numeric(v) = classify_value(raw) {
                stats.push(v);
            }
        }
    }
    ColumnAggregate {
        column: name.to_string(),
        count: stats.count(),
        mean: stats.mean(),
        min: stats.min(),
        max: stats.max(),
    }
}
