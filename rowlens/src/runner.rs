//! Orchestration for profiling one or more datasets.
//!
//! The [`Runner`] is the explicit driver behind the CLI: it takes a
//! [`RunConfig`] describing which files to profile and how to group them,
//! loads each dataset, and collects the results into a [`RunSummary`].
//! One dataset failing does not abort the rest of the run by default; each
//! failure is recorded alongside the reports that did succeed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rowlens::runner::{DatasetSpec, RunConfig, Runner};
//!
//! # fn main() -> rowlens::error::Result<()> {
//! let config = RunConfig::new()
//!     .add_dataset(DatasetSpec::new("ads.csv").with_group_by(["page_id"]));
//!
//! let summary = Runner::new().run(&config)?;
//! for report in summary.reports() {
//!     println!("{}: {} rows", report.source, report.profile.row_count);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{ProfileError, Result};
use crate::profile::{
    ColumnProfiler, GroupBy, GroupByProfile, ProfilerConfig, TableProfile, DEFAULT_TOP_GROUPS,
};
use crate::sources::{CsvOptions, CsvSource};
use crate::table::Table;

/// Profiling results for a single dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Label of the source, usually its file path.
    pub source: String,
    /// Column-level profile of the whole table.
    pub profile: TableProfile,
    /// One ranked group report per grouping request that succeeded.
    pub groups: Vec<GroupByProfile>,
}

/// One dataset to profile and how to group it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Path of the CSV file.
    pub path: PathBuf,
    /// Grouping requests, each a list of key columns.
    #[serde(default)]
    pub group_by: Vec<Vec<String>>,
}

impl DatasetSpec {
    /// Creates a spec for the given file with no grouping requests.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            group_by: Vec::new(),
        }
    }

    /// Adds a grouping request over the given key columns.
    pub fn with_group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by
            .push(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for a profiling run: the datasets to analyze.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub datasets: Vec<DatasetSpec>,
}

impl RunConfig {
    /// Creates an empty run configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset to the run.
    pub fn add_dataset(mut self, spec: DatasetSpec) -> Self {
        self.datasets.push(spec);
        self
    }

    /// Loads a run configuration from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A failure recorded while profiling a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFailure {
    /// Path of the dataset the failure belongs to.
    pub path: PathBuf,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// True when the failure was a missing input file.
    pub file_not_found: bool,
}

/// Timing metadata for a profiling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Timestamp when the run started.
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Timestamp when the run completed.
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl RunMetadata {
    fn record_start(&mut self) {
        self.start_time = Some(chrono::Utc::now());
    }

    fn record_end(&mut self) {
        self.end_time = Some(chrono::Utc::now());
    }

    /// Returns the run duration if both start and end times are recorded.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// The outcome of a profiling run: reports plus any recorded failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    reports: Vec<DatasetReport>,
    failures: Vec<RunFailure>,
    metadata: RunMetadata,
}

impl RunSummary {
    fn new() -> Self {
        Self::default()
    }

    fn record_failure(&mut self, path: &Path, error: &ProfileError) {
        self.failures.push(RunFailure {
            path: path.to_path_buf(),
            message: error.to_string(),
            file_not_found: error.is_file_not_found(),
        });
    }

    /// Reports for the datasets that profiled successfully.
    pub fn reports(&self) -> &[DatasetReport] {
        &self.reports
    }

    /// All recorded failures.
    pub fn failures(&self) -> &[RunFailure] {
        &self.failures
    }

    /// Checks whether any failures were recorded.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns the run metadata.
    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Consumes the summary, yielding the successful reports.
    pub fn into_reports(self) -> Vec<DatasetReport> {
        self.reports
    }
}

/// Drives profiling over the datasets of a [`RunConfig`].
///
/// All knobs live on the runner itself; there is no shared or global state,
/// so two runners with different settings can coexist in one process.
#[derive(Debug, Clone)]
pub struct Runner {
    profiler: ColumnProfiler,
    csv_options: CsvOptions,
    top_groups: usize,
    include_aggregates: bool,
    continue_on_error: bool,
}

impl Runner {
    /// Creates a runner with default settings.
    pub fn new() -> Self {
        Self {
            profiler: ColumnProfiler::new(),
            csv_options: CsvOptions::default(),
            top_groups: DEFAULT_TOP_GROUPS,
            include_aggregates: true,
            continue_on_error: true,
        }
    }

    /// Sets the column profiler configuration used for each dataset.
    pub fn with_profiler_config(mut self, config: ProfilerConfig) -> Self {
        self.profiler = ColumnProfiler::with_config(config);
        self
    }

    /// Sets the CSV parsing options used when loading datasets.
    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv_options = options;
        self
    }

    /// Sets how many groups each group report keeps.
    pub fn with_top_groups(mut self, top_groups: usize) -> Self {
        self.top_groups = top_groups;
        self
    }

    /// Sets whether group reports include per-column numeric aggregates.
    pub fn with_aggregates(mut self, include: bool) -> Self {
        self.include_aggregates = include;
        self
    }

    /// Sets whether to continue the run when individual datasets fail.
    ///
    /// Default is true (continue on error).
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Profiles every dataset in the configuration.
    ///
    /// Failures are contained per dataset: a file that cannot be loaded or
    /// profiled is recorded in the summary and the run moves on. A grouping
    /// request naming absent columns is likewise recorded without discarding
    /// the dataset's column profile. With `continue_on_error(false)` the
    /// first failure is returned instead.
    #[instrument(skip(self, config), fields(dataset_count = config.datasets.len()))]
    pub fn run(&self, config: &RunConfig) -> Result<RunSummary> {
        info!("Profiling {} datasets", config.datasets.len());

        let mut summary = RunSummary::new();
        summary.metadata.record_start();

        for spec in &config.datasets {
            let (table, profile) = match self.profile_source(spec) {
                Ok(pair) => pair,
                Err(e) => {
                    error!(
                        path = %spec.path.display(),
                        error = %e,
                        "dataset profiling failed"
                    );
                    summary.record_failure(&spec.path, &e);
                    if !self.continue_on_error {
                        return Err(e);
                    }
                    continue;
                }
            };

            let mut groups = Vec::with_capacity(spec.group_by.len());
            for columns in &spec.group_by {
                match self.grouping(columns).profile(&table) {
                    Ok(group_report) => groups.push(group_report),
                    Err(e) => {
                        warn!(
                            path = %spec.path.display(),
                            columns = ?columns,
                            error = %e,
                            "grouping request failed"
                        );
                        summary.record_failure(&spec.path, &e);
                        if !self.continue_on_error {
                            return Err(e);
                        }
                    }
                }
            }

            debug!(path = %spec.path.display(), "dataset profiled");
            summary.reports.push(DatasetReport {
                source: spec.path.display().to_string(),
                profile,
                groups,
            });
        }

        summary.metadata.record_end();
        if let Some(duration) = summary.metadata.duration() {
            info!(
                "Run completed in {:.2}s",
                duration.num_milliseconds() as f64 / 1000.0
            );
        }

        Ok(summary)
    }

    /// Profiles a single dataset, propagating the first failure.
    ///
    /// Unlike [`run`](Self::run), nothing is contained here: a missing file,
    /// a malformed row, or a grouping request naming absent columns all fail
    /// the whole dataset.
    #[instrument(skip(self, spec), fields(path = %spec.path.display()))]
    pub fn run_dataset(&self, spec: &DatasetSpec) -> Result<DatasetReport> {
        let (table, profile) = self.profile_source(spec)?;
        let mut groups = Vec::with_capacity(spec.group_by.len());
        for columns in &spec.group_by {
            groups.push(self.grouping(columns).profile(&table)?);
        }
        Ok(DatasetReport {
            source: spec.path.display().to_string(),
            profile,
            groups,
        })
    }

    fn profile_source(&self, spec: &DatasetSpec) -> Result<(Table, TableProfile)> {
        let source = CsvSource::with_options(&spec.path, self.csv_options.clone());
        let table = source.load()?;
        let profile = self.profiler.profile_table(&table)?;
        Ok((table, profile))
    }

    fn grouping(&self, columns: &[String]) -> GroupBy {
        GroupBy::new(columns.iter().cloned())
            .with_top_n(self.top_groups)
            .with_aggregates(self.include_aggregates)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    fn ads_csv() -> NamedTempFile {
        write_csv(
            "page_id,ad_type,clicks\n\
             p1,banner,3\n\
             p2,video,5\n\
             p1,banner,1\n\
             p1,video,\n\
             p2,banner,2\n",
        )
    }

    #[test]
    fn test_run_dataset_profiles_and_groups() {
        let file = ads_csv();
        let spec = DatasetSpec::new(file.path()).with_group_by(["page_id"]);

        let report = Runner::new().run_dataset(&spec).unwrap();

        assert_eq!(report.profile.row_count, 5);
        assert_eq!(report.profile.column_count, 3);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].total_groups, 2);
        assert_eq!(report.source, file.path().display().to_string());
    }

    #[test]
    fn test_run_dataset_propagates_grouping_error() {
        let file = ads_csv();
        let spec = DatasetSpec::new(file.path()).with_group_by(["nope"]);

        let err = Runner::new().run_dataset(&spec).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_run_continues_after_missing_file() {
        let file = ads_csv();
        let config = RunConfig::new()
            .add_dataset(DatasetSpec::new("/nonexistent/missing.csv"))
            .add_dataset(DatasetSpec::new(file.path()));

        let summary = Runner::new().run(&config).unwrap();

        assert_eq!(summary.reports().len(), 1);
        assert_eq!(summary.failures().len(), 1);
        assert!(summary.failures()[0].file_not_found);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_run_keeps_profile_when_grouping_fails() {
        let file = ads_csv();
        let config = RunConfig::new().add_dataset(
            DatasetSpec::new(file.path())
                .with_group_by(["nope", "gone"])
                .with_group_by(["page_id"]),
        );

        let summary = Runner::new().run(&config).unwrap();

        assert_eq!(summary.reports().len(), 1);
        let report = &summary.reports()[0];
        // The bad request is dropped, the good one survives.
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].group_columns, vec!["page_id"]);
        assert_eq!(summary.failures().len(), 1);
        assert!(summary.failures()[0]
            .message
            .contains("Missing columns: nope, gone"));
        assert!(!summary.failures()[0].file_not_found);
    }

    #[test]
    fn test_run_stops_at_first_failure_when_strict() {
        let file = ads_csv();
        let config = RunConfig::new()
            .add_dataset(DatasetSpec::new("/nonexistent/missing.csv"))
            .add_dataset(DatasetSpec::new(file.path()));

        let err = Runner::new()
            .continue_on_error(false)
            .run(&config)
            .unwrap_err();
        assert!(err.is_file_not_found());
    }

    #[test]
    fn test_run_respects_runner_settings() {
        let file = ads_csv();
        let config = RunConfig::new()
            .add_dataset(DatasetSpec::new(file.path()).with_group_by(["page_id"]));

        let summary = Runner::new()
            .with_top_groups(1)
            .with_aggregates(false)
            .run(&config)
            .unwrap();

        let group_report = &summary.reports()[0].groups[0];
        assert_eq!(group_report.top_groups.len(), 1);
        assert!(group_report.truncated);
        assert!(group_report.top_groups[0].aggregates.is_empty());
    }

    #[test]
    fn test_run_records_timing_metadata() {
        let file = ads_csv();
        let config = RunConfig::new().add_dataset(DatasetSpec::new(file.path()));

        let summary = Runner::new().run(&config).unwrap();

        assert!(summary.metadata().start_time.is_some());
        assert!(summary.metadata().end_time.is_some());
        assert!(summary.metadata().duration().is_some());
    }

    #[test]
    fn test_run_config_json_round_trip() {
        let config = RunConfig::new().add_dataset(
            DatasetSpec::new("ads.csv")
                .with_group_by(["page_id"])
                .with_group_by(["page_id", "ad_type"]),
        );

        let json = config.to_json().unwrap();
        let restored = RunConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_empty_config_produces_empty_summary() {
        let summary = Runner::new().run(&RunConfig::new()).unwrap();
        assert!(summary.reports().is_empty());
        assert!(!summary.has_failures());
    }
}
