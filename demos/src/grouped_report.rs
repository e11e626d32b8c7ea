//! Example demonstrating group breakdowns and the report formatters.
//!
//! This example shows how to:
//! - Drive a profiling run from a [`RunConfig`]
//! - Request group breakdowns over one and two key columns
//! - Render the same report as human-readable text, Markdown, and JSON

use std::error::Error;
use std::io::Write;

use rowlens::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use rowlens::runner::{DatasetSpec, RunConfig, Runner};

fn main() -> Result<(), Box<dyn Error>> {
    // Ad impressions with a missing page id and a missing click count
    let mut file = tempfile::NamedTempFile::with_suffix(".csv")?;
    writeln!(file, "page_id,ad_type,clicks,cost")?;
    writeln!(file, "p1,banner,3,0.31")?;
    writeln!(file, "p2,video,5,1.20")?;
    writeln!(file, "p1,banner,1,0.25")?;
    writeln!(file, ",video,2,0.90")?;
    writeln!(file, "p2,banner,,0.40")?;
    writeln!(file, "p1,video,4,1.05")?;
    file.flush()?;

    let config = RunConfig::new().add_dataset(
        DatasetSpec::new(file.path())
            .with_group_by(["page_id"])
            .with_group_by(["page_id", "ad_type"]),
    );

    let summary = Runner::new().run(&config)?;
    let report = &summary.reports()[0];

    // Human-readable, without colors for piping
    println!("=== Human format ===\n");
    let human = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
    println!("{}", human.format(report)?);

    // Markdown for documentation
    println!("=== Markdown format ===\n");
    let markdown = MarkdownFormatter::new().with_heading_level(3);
    println!("{}", markdown.format(report)?);

    // Compact JSON for programmatic consumption
    println!("=== JSON format ===\n");
    let json = JsonFormatter::new().with_pretty(false);
    println!("{}", json.format(report)?);

    Ok(())
}
