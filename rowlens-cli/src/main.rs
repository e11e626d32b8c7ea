//! Command-line CSV column profiler.
//!
//! Profiles one or more CSV files and prints per-column summaries, with
//! optional group breakdowns, in human-readable, JSON, or Markdown form.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::Level;

use rowlens::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use rowlens::logging::{init_logging, LoggingConfig};
use rowlens::profile::ProfilerConfig;
use rowlens::runner::{DatasetSpec, RunConfig, Runner};
use rowlens::sources::CsvOptions;

#[derive(Parser, Debug)]
#[command(
    name = "rowlens",
    about = "Profile CSV files column by column",
    long_about = "Profiles CSV files column by column: numeric columns get mean, min, max,\n\
                  standard deviation, and percentiles; categorical columns get unique counts\n\
                  and their most frequent values. Group breakdowns report the largest groups\n\
                  with per-group numeric aggregates.",
    version,
    after_help = "Examples:\n  \
      rowlens data.csv                                  # Profile every column\n  \
      rowlens --group-by page_id data.csv               # Add a group breakdown\n  \
      rowlens --group-by page_id,ad_type data.csv       # Multi-column group key\n  \
      rowlens --group-by a --group-by b data.csv        # Two separate breakdowns\n  \
      rowlens --top 10 --format markdown data.csv       # Ten groups, Markdown output\n  \
      rowlens --format json data.csv users.csv          # JSON array over several files"
)]
struct Cli {
    /// CSV files to profile
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Group by these columns, comma-separated (repeatable)
    #[arg(long = "group-by", value_name = "COLUMNS")]
    group_by: Vec<String>,

    /// How many groups each group breakdown reports
    #[arg(long, default_value_t = 5, value_name = "N")]
    top: usize,

    /// How many frequent values each categorical summary keeps
    #[arg(long = "top-values", default_value_t = 5, value_name = "N")]
    top_values: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Field delimiter, a single character (use "\\t" for tabs)
    #[arg(long, default_value = ",", value_name = "CHAR")]
    delimiter: String,

    /// Skip per-group numeric aggregates
    #[arg(long = "no-aggregates")]
    no_aggregates: bool,

    /// Disable colorized output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    init_logging(
        LoggingConfig::default()
            .with_level(level)
            .with_rowlens_level(level),
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let delimiter = parse_delimiter(&cli.delimiter)?;
    let group_requests = parse_group_requests(&cli.group_by)?;

    let mut config = RunConfig::new();
    for file in &cli.files {
        let mut spec = DatasetSpec::new(file);
        for columns in &group_requests {
            spec = spec.with_group_by(columns.iter().cloned());
        }
        config = config.add_dataset(spec);
    }

    let runner = Runner::new()
        .with_profiler_config(ProfilerConfig {
            top_values: cli.top_values,
            ..ProfilerConfig::default()
        })
        .with_csv_options(CsvOptions::default().with_delimiter(delimiter))
        .with_top_groups(cli.top)
        .with_aggregates(!cli.no_aggregates);

    let summary = runner.run(&config)?;

    for failure in summary.failures() {
        eprintln!("error: {}: {}", failure.path.display(), failure.message);
    }

    let formatter_config = FormatterConfig::default()
        .with_colors(!cli.no_color)
        .with_aggregates(!cli.no_aggregates);

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::with_config(formatter_config);
            println!("{}", formatter.format_reports(summary.reports())?);
        }
        OutputFormat::Human => {
            let formatter = HumanFormatter::with_config(formatter_config);
            for report in summary.reports() {
                println!("{}", formatter.format(report)?);
            }
        }
        OutputFormat::Markdown => {
            let formatter = MarkdownFormatter::with_config(formatter_config);
            for report in summary.reports() {
                println!("{}", formatter.format(report)?);
            }
        }
    }

    // Fail the invocation only when nothing could be profiled at all.
    if summary.reports().is_empty() && summary.has_failures() {
        process::exit(1);
    }

    Ok(())
}

/// Splits each repeatable `--group-by` value into its column names.
fn parse_group_requests(raw: &[String]) -> Result<Vec<Vec<String>>> {
    let mut requests = Vec::with_capacity(raw.len());
    for value in raw {
        let columns: Vec<String> = value
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if columns.is_empty() {
            anyhow::bail!("--group-by needs at least one column name, got {value:?}");
        }
        requests.push(columns);
    }
    Ok(requests)
}

fn parse_delimiter(value: &str) -> Result<u8> {
    if value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => anyhow::bail!("delimiter must be a single character, got {value:?}"),
    }
}
