//! Example demonstrating basic column profiling.
//!
//! This example shows how to:
//! - Load a CSV file into a table
//! - Profile every column at once
//! - Inspect individual column summaries programmatically
//! - Print a human-readable report

use std::error::Error;
use std::io::Write;

use rowlens::formatters::{HumanFormatter, ReportFormatter};
use rowlens::profile::ColumnProfiler;
use rowlens::runner::DatasetReport;
use rowlens::sources::CsvSource;

fn main() -> Result<(), Box<dyn Error>> {
    // Write a small dataset to profile
    let mut file = tempfile::NamedTempFile::with_suffix(".csv")?;
    writeln!(file, "product,category,price,stock")?;
    writeln!(file, "laptop,electronics,999.99,12")?;
    writeln!(file, "mouse,electronics,24.50,130")?;
    writeln!(file, "desk,furniture,289.00,8")?;
    writeln!(file, "chair,furniture,120.00,")?;
    writeln!(file, "monitor,electronics,,25")?;
    file.flush()?;

    // Load and profile it
    let table = CsvSource::new(file.path()).load()?;
    let profiler = ColumnProfiler::new();
    let profile = profiler.profile_table(&table)?;

    // Inspect summaries programmatically
    println!("Numeric columns: {:?}", profile.numeric_columns());
    if let Some(price) = profile.column("price") {
        println!(
            "price: {} non-missing values, {} missing",
            price.count, price.missing
        );
        if let Some(numeric) = &price.numeric {
            println!("price mean: {:.2}", numeric.mean);
        }
    }
    println!();

    // Print the full report
    let report = DatasetReport {
        source: "inventory.csv".to_string(),
        profile,
        groups: Vec::new(),
    };
    let formatter = HumanFormatter::new();
    println!("{}", formatter.format(&report)?);

    Ok(())
}
