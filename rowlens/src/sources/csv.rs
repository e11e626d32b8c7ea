//! CSV file source.
//!
//! Decodes a CSV file into a [`Table`] of raw strings. No type coercion
//! happens here; every field stays exactly as it appeared in the file, and
//! empty fields become the empty string the profiler treats as missing.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{ProfileError, Result};
use crate::table::Table;

/// Options for configuring CSV file reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Escape character (default: None)
    pub escape: Option<u8>,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            escape: None,
            comment: None,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the file starts with a header row.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the comment prefix; prefixed lines are skipped.
    pub fn with_comment(mut self, comment: u8) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// A CSV file to load as a [`Table`].
///
/// # Examples
///
/// ```rust,no_run
/// use rowlens::sources::{CsvOptions, CsvSource};
///
/// # fn main() -> rowlens::error::Result<()> {
/// // Simple CSV file
/// let table = CsvSource::new("data/users.csv").load()?;
///
/// // Tab-separated, no header row
/// let options = CsvOptions::default()
///     .with_delimiter(b'\t')
///     .with_header(false);
/// let table = CsvSource::with_options("data/users.tsv", options).load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source for a file path with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: CsvOptions::default(),
        }
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// The file path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured read options.
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Short description of the source for logs and reports.
    pub fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }

    /// Reads the file into a [`Table`].
    ///
    /// A missing file maps to [`ProfileError::FileNotFound`]; every other
    /// I/O or decode failure keeps its own kind so callers can tell the two
    /// apart.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Table> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ProfileError::file_not_found(&self.path)
            } else {
                ProfileError::Io(e)
            }
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .escape(self.options.escape)
            .comment(self.options.comment)
            .from_reader(file);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let headers = if self.options.has_header {
            reader.headers()?.iter().map(str::to_string).collect()
        } else {
            // Synthesize column_1..column_N from the first row's width.
            let width = rows.first().map_or(0, Vec::len);
            (1..=width).map(|i| format!("column_{i}")).collect()
        };

        let table = Table::new(headers, rows)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded csv"
        );
        Ok(table)
    }
}
