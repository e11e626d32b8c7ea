//! In-memory table model shared by every profiling operation.
//!
//! A [`Table`] is an ordered list of column names plus an ordered list of
//! rows, where each row holds exactly one raw string value per column.
//! Values are never coerced at this layer; type inference happens later in
//! the profiling pass. The empty string represents a missing value.

use std::collections::HashMap;

use crate::error::{ProfileError, Result};

/// Returns true when a raw value counts as missing.
///
/// Missing values are excluded from non-missing counts, numeric parsing, and
/// categorical uniqueness, and are replaced by a sentinel in group keys.
pub fn is_missing(value: &str) -> bool {
    value.is_empty()
}

/// An immutable, fully materialized table of raw string values.
///
/// Rows are stored positionally, aligned to `headers`; the name-to-position
/// mapping required by callers is provided through [`Table::column_index`].
/// Construction validates that every row carries exactly one value per
/// header, so downstream code can index columns without bounds churn.
///
/// # Examples
///
/// ```rust
/// use rowlens::table::Table;
///
/// let table = Table::new(
///     vec!["name".into(), "score".into()],
///     vec![
///         vec!["alice".into(), "10".into()],
///         vec!["bob".into(), "".into()],
///     ],
/// )?;
///
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.get(1, "score"), Some(""));
/// # Ok::<(), rowlens::error::ProfileError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and rows, validating row widths.
    ///
    /// Returns [`ProfileError::InvalidRow`] for the first row whose width
    /// does not match the header count.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let expected = headers.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ProfileError::invalid_row(i, expected, row.len()));
            }
        }

        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            // Duplicate header names keep the first occurrence for lookup.
            index.entry(name.clone()).or_insert(i);
        }

        Ok(Self {
            headers,
            index,
            rows,
        })
    }

    /// Creates an empty table with the given headers.
    pub fn with_headers(headers: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// The ordered column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns true when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    ///
    /// When headers contain duplicate names, the first occurrence wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The raw rows, in insertion order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Value at a row/column position, if both are in range.
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }

    /// Value at a row position for a named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.value(row, idx)
    }

    /// Iterates a column's raw values in row order.
    ///
    /// `column` must be a valid position (`< column_count()`); positions
    /// obtained from [`Table::column_index`] or header enumeration always
    /// are, thanks to the width invariant enforced at construction.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[column].as_str())
    }
}
