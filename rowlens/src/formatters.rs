//! Report formatting for profiling results.
//!
//! This module provides different formatters for dataset reports, allowing
//! users to output results in various formats like JSON, human-readable text,
//! or Markdown for documentation purposes.
//!
//! # Examples
//!
//! ```rust
//! use rowlens::formatters::{HumanFormatter, ReportFormatter};
//! use rowlens::profile::ColumnProfiler;
//! use rowlens::runner::DatasetReport;
//! use rowlens::table::Table;
//!
//! # fn main() -> rowlens::error::Result<()> {
//! let table = Table::new(
//!     vec!["city".into()],
//!     vec![vec!["Austin".into()], vec!["Boston".into()]],
//! )?;
//! let report = DatasetReport {
//!     source: "cities.csv".to_string(),
//!     profile: ColumnProfiler::new().profile_table(&table)?,
//!     groups: Vec::new(),
//! };
//!
//! let formatter = HumanFormatter::new();
//! println!("{}", formatter.format(&report)?);
//! # Ok(())
//! # }
//! ```

use std::fmt::Write;

use crate::error::Result;
use crate::profile::{ColumnProfile, GroupByProfile};
use crate::runner::DatasetReport;

/// Configuration options for formatting dataset reports.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterConfig {
    /// Include percentile lines for numeric columns
    pub include_percentiles: bool,
    /// Include per-group numeric aggregates
    pub include_aggregates: bool,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include a generation timestamp in output
    pub include_timestamps: bool,
    /// Decimal places for means, deviations, and percentiles
    pub decimal_places: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_percentiles: true,
            include_aggregates: true,
            use_colors: true,
            include_timestamps: false,
            decimal_places: 2,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration: shapes, kinds, and counts only.
    pub fn minimal() -> Self {
        Self {
            include_percentiles: false,
            include_aggregates: false,
            use_colors: false,
            include_timestamps: false,
            decimal_places: 2,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_percentiles: true,
            include_aggregates: true,
            use_colors: true,
            include_timestamps: true,
            decimal_places: 2,
        }
    }

    /// Sets whether numeric percentiles are rendered.
    pub fn with_percentiles(mut self, include: bool) -> Self {
        self.include_percentiles = include;
        self
    }

    /// Sets whether per-group aggregates are rendered.
    pub fn with_aggregates(mut self, include: bool) -> Self {
        self.include_aggregates = include;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether a generation timestamp is rendered.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Sets the decimal places used for floating-point output.
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = places;
        self
    }
}

/// Trait for formatting dataset reports into different output formats.
///
/// # Examples
///
/// ```rust
/// use rowlens::formatters::ReportFormatter;
/// use rowlens::runner::DatasetReport;
///
/// struct CountFormatter;
///
/// impl ReportFormatter for CountFormatter {
///     fn format(&self, report: &DatasetReport) -> rowlens::error::Result<String> {
///         Ok(format!("{} columns", report.profile.column_count))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a dataset report into a string representation.
    fn format(&self, report: &DatasetReport) -> Result<String>;

    /// Formats a dataset report with custom configuration.
    fn format_with_config(
        &self,
        report: &DatasetReport,
        _config: &FormatterConfig,
    ) -> Result<String> {
        // Default implementation ignores config and uses standard format
        self.format(report)
    }
}

/// Formats dataset reports as structured JSON.
///
/// Output is the serde representation of [`DatasetReport`], with percentile
/// and aggregate fields pruned when the configuration disables them. Suited
/// for programmatic consumption.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Formats several dataset reports as one JSON array.
    pub fn format_reports(&self, reports: &[DatasetReport]) -> Result<String> {
        let values: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| filter_report_for_config(r, &self.config))
            .collect::<Result<_>>()?;
        let combined = serde_json::Value::Array(values);
        if self.pretty {
            Ok(serde_json::to_string_pretty(&combined)?)
        } else {
            Ok(serde_json::to_string(&combined)?)
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &DatasetReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DatasetReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_report_for_config(report, config)?;
        if self.pretty {
            Ok(serde_json::to_string_pretty(&filtered)?)
        } else {
            Ok(serde_json::to_string(&filtered)?)
        }
    }
}

/// Serializes a report and prunes the sections the config disables.
fn filter_report_for_config(
    report: &DatasetReport,
    config: &FormatterConfig,
) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(report)?;
    if !config.include_percentiles {
        if let Some(columns) = value
            .get_mut("profile")
            .and_then(|p| p.get_mut("columns"))
            .and_then(|c| c.as_array_mut())
        {
            for column in columns {
                if let Some(numeric) = column.get_mut("numeric").filter(|n| !n.is_null()) {
                    if let Some(obj) = numeric.as_object_mut() {
                        obj.remove("percentiles");
                    }
                }
            }
        }
    }
    if !config.include_aggregates {
        if let Some(groups) = value.get_mut("groups").and_then(|g| g.as_array_mut()) {
            for group_report in groups {
                if let Some(top) = group_report
                    .get_mut("top_groups")
                    .and_then(|t| t.as_array_mut())
                {
                    for group in top {
                        if let Some(obj) = group.as_object_mut() {
                            obj.remove("aggregates");
                        }
                    }
                }
            }
        }
    }
    Ok(value)
}

/// Formats dataset reports for console reading.
///
/// Mirrors the classic banner-style analysis printout: a header per dataset,
/// a block per column, and a ranked section per grouping request.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &DatasetReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DatasetReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", "=".repeat(60)).unwrap();
        if config.use_colors {
            writeln!(output, "📊 Dataset: \x1b[1m{}\x1b[0m", report.source).unwrap();
        } else {
            writeln!(output, "📊 Dataset: {}", report.source).unwrap();
        }
        writeln!(output, "{}", "=".repeat(60)).unwrap();
        writeln!(
            output,
            "Shape: {} rows, {} columns",
            report.profile.row_count, report.profile.column_count
        )
        .unwrap();
        if config.include_timestamps {
            writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
        }

        for column in &report.profile.columns {
            writeln!(output).unwrap();
            self.write_column(&mut output, column, config);
        }

        for group_report in &report.groups {
            writeln!(output).unwrap();
            self.write_groups(&mut output, report, group_report, config);
        }

        writeln!(output).unwrap();
        Ok(output)
    }
}

impl HumanFormatter {
    fn write_column(&self, output: &mut String, column: &ColumnProfile, config: &FormatterConfig) {
        let prec = config.decimal_places;
        if config.use_colors {
            writeln!(output, "Column: \x1b[36m{}\x1b[0m", column.name).unwrap();
        } else {
            writeln!(output, "Column: {}", column.name).unwrap();
        }
        writeln!(output, "  Type: {}", column.kind).unwrap();
        writeln!(
            output,
            "  Count: {} ({} missing, {:.1}%)",
            column.count,
            column.missing,
            column.missing_percentage()
        )
        .unwrap();

        if let Some(numeric) = &column.numeric {
            writeln!(output, "  Mean: {:.prec$}", numeric.mean).unwrap();
            writeln!(output, "  Min: {:.prec$}", numeric.min).unwrap();
            writeln!(output, "  Max: {:.prec$}", numeric.max).unwrap();
            match numeric.std_dev {
                Some(std_dev) => writeln!(output, "  Std Dev: {std_dev:.prec$}").unwrap(),
                None => writeln!(output, "  Std Dev: n/a (single value)").unwrap(),
            }
            if config.include_percentiles && !numeric.percentiles.is_empty() {
                writeln!(output, "  Percentiles:").unwrap();
                for point in &numeric.percentiles {
                    writeln!(output, "    {}: {:.prec$}", point.label(), point.value).unwrap();
                }
            }
        }

        if let Some(categorical) = &column.categorical {
            writeln!(output, "  Unique values: {}", categorical.unique_count).unwrap();
            if !categorical.top_values.is_empty() {
                writeln!(output, "  Top values:").unwrap();
                for vc in &categorical.top_values {
                    writeln!(
                        output,
                        "    {}: {} ({:.1}%)",
                        vc.value,
                        vc.count,
                        vc.percentage(column.count)
                    )
                    .unwrap();
                }
            }
        }
    }

    fn write_groups(
        &self,
        output: &mut String,
        report: &DatasetReport,
        group_report: &GroupByProfile,
        config: &FormatterConfig,
    ) {
        let prec = config.decimal_places;
        let columns = group_report.group_columns.join(", ");

        writeln!(output, "{}", "-".repeat(60)).unwrap();
        if config.use_colors {
            writeln!(output, "🔎 Group-by: \x1b[1m{columns}\x1b[0m").unwrap();
        } else {
            writeln!(output, "🔎 Group-by: {columns}").unwrap();
        }
        writeln!(output, "{}", "-".repeat(60)).unwrap();
        writeln!(output, "Total groups: {}", group_report.total_groups).unwrap();
        writeln!(
            output,
            "Top {} groups by size:",
            group_report.top_groups.len()
        )
        .unwrap();

        let total_rows = report.profile.row_count;
        for group in &group_report.top_groups {
            let share = if total_rows == 0 {
                0.0
            } else {
                group.size as f64 / total_rows as f64 * 100.0
            };
            writeln!(output, "  {}: {} rows ({share:.1}%)", group.key, group.size).unwrap();
            if config.include_aggregates {
                for agg in &group.aggregates {
                    match (agg.mean, agg.min, agg.max) {
                        (Some(mean), Some(min), Some(max)) => writeln!(
                            output,
                            "    {}: count={}, mean={mean:.prec$}, min={min:.prec$}, max={max:.prec$}",
                            agg.column, agg.count
                        )
                        .unwrap(),
                        _ => writeln!(output, "    {}: count=0", agg.column).unwrap(),
                    }
                }
            }
        }
        if group_report.truncated {
            let hidden = group_report.total_groups - group_report.top_groups.len();
            writeln!(output, "  ... and {hidden} more groups").unwrap();
        }
    }
}

/// Formats dataset reports as Markdown suitable for documentation.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &DatasetReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &DatasetReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let prec = config.decimal_places;
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Dataset: {}", report.source).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "**Shape:** {} rows, {} columns",
            report.profile.row_count, report.profile.column_count
        )
        .unwrap();
        if config.include_timestamps {
            writeln!(
                output,
                "**Generated:** {}",
                chrono::Utc::now().to_rfc3339()
            )
            .unwrap();
        }

        // Column overview table
        writeln!(output).unwrap();
        writeln!(output, "{h}# Columns").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Column | Type | Count | Missing | Summary |").unwrap();
        writeln!(output, "|--------|------|-------|---------|---------|").unwrap();
        for column in &report.profile.columns {
            let summary = match (&column.numeric, &column.categorical) {
                (Some(numeric), _) => {
                    let std = numeric
                        .std_dev
                        .map_or("n/a".to_string(), |s| format!("{s:.prec$}"));
                    format!(
                        "mean {:.prec$}, min {:.prec$}, max {:.prec$}, std {std}",
                        numeric.mean, numeric.min, numeric.max
                    )
                }
                (_, Some(categorical)) => {
                    let top = categorical
                        .top_values
                        .first()
                        .map_or("none".to_string(), |vc| {
                            format!(
                                "`{}` ({}, {:.1}%)",
                                vc.value,
                                vc.count,
                                vc.percentage(column.count)
                            )
                        });
                    format!("{} unique, top {top}", categorical.unique_count)
                }
                _ => String::new(),
            };
            writeln!(
                output,
                "| {} | {} | {} | {} | {summary} |",
                column.name, column.kind, column.count, column.missing
            )
            .unwrap();
        }

        if config.include_percentiles {
            self.write_percentile_table(&mut output, report, &h, prec);
        }

        for group_report in &report.groups {
            self.write_groups(&mut output, report, group_report, config, &h);
        }

        Ok(output)
    }
}

impl MarkdownFormatter {
    fn write_percentile_table(
        &self,
        output: &mut String,
        report: &DatasetReport,
        h: &str,
        prec: usize,
    ) {
        let numeric_columns: Vec<&ColumnProfile> = report
            .profile
            .columns
            .iter()
            .filter(|c| c.numeric.as_ref().is_some_and(|n| !n.percentiles.is_empty()))
            .collect();
        if numeric_columns.is_empty() {
            return;
        }

        // All numeric summaries share the configured quantile set.
        let labels: Vec<String> = numeric_columns[0]
            .numeric
            .as_ref()
            .map(|n| n.percentiles.iter().map(|p| p.label()).collect())
            .unwrap_or_default();

        writeln!(output).unwrap();
        writeln!(output, "{h}# Percentiles").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Column | {} |", labels.join(" | ")).unwrap();
        writeln!(output, "|--------|{}", "-------|".repeat(labels.len())).unwrap();
        for column in numeric_columns {
            if let Some(numeric) = &column.numeric {
                let cells: Vec<String> = numeric
                    .percentiles
                    .iter()
                    .map(|p| format!("{:.prec$}", p.value))
                    .collect();
                writeln!(output, "| {} | {} |", column.name, cells.join(" | ")).unwrap();
            }
        }
    }

    fn write_groups(
        &self,
        output: &mut String,
        report: &DatasetReport,
        group_report: &GroupByProfile,
        config: &FormatterConfig,
        h: &str,
    ) {
        let prec = config.decimal_places;
        writeln!(output).unwrap();
        writeln!(
            output,
            "{h}# Group-by: {}",
            group_report.group_columns.join(", ")
        )
        .unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Total groups: {}", group_report.total_groups).unwrap();
        writeln!(output).unwrap();

        if config.include_aggregates {
            writeln!(output, "| Group | Rows | Share | Aggregates |").unwrap();
            writeln!(output, "|-------|------|-------|------------|").unwrap();
        } else {
            writeln!(output, "| Group | Rows | Share |").unwrap();
            writeln!(output, "|-------|------|-------|").unwrap();
        }

        let total_rows = report.profile.row_count;
        for group in &group_report.top_groups {
            let share = if total_rows == 0 {
                0.0
            } else {
                group.size as f64 / total_rows as f64 * 100.0
            };
            if config.include_aggregates {
                let aggs: Vec<String> = group
                    .aggregates
                    .iter()
                    .map(|agg| match agg.mean {
                        Some(mean) => {
                            format!("`{}` mean {mean:.prec$} (n={})", agg.column, agg.count)
                        }
                        None => format!("`{}` n=0", agg.column),
                    })
                    .collect();
                writeln!(
                    output,
                    "| {} | {} | {share:.1}% | {} |",
                    group.key,
                    group.size,
                    aggs.join("; ")
                )
                .unwrap();
            } else {
                writeln!(output, "| {} | {} | {share:.1}% |", group.key, group.size).unwrap();
            }
        }
        if group_report.truncated {
            writeln!(output).unwrap();
            writeln!(
                output,
                "_{} more groups not shown._",
                group_report.total_groups - group_report.top_groups.len()
            )
            .unwrap();
        }
    }
}
