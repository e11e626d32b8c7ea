//! Prelude for commonly used types and traits in rowlens.

pub use crate::error::{ErrorContext, ProfileError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::LoggingConfig;
pub use crate::profile::{ColumnProfiler, GroupBy, ProfilerConfig};
pub use crate::runner::{DatasetSpec, RunConfig, Runner};
pub use crate::sources::CsvSource;
pub use crate::table::Table;
