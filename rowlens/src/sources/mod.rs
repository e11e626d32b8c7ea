//! Data source loading for profiling runs.
//!
//! Sources turn external data into an in-memory [`Table`](crate::table::Table)
//! that the profilers consume. CSV is the only format supported today.

pub mod csv;

pub use csv::{CsvOptions, CsvSource};
