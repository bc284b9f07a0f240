// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use defect_age_metadata::DefectAgeExitCode;
use defect_age_runner::{
    config::{ConfigLocation, ConfigOverrides, DefectAgeConfig},
    pipeline::{PipelineOutcome, ReportPipeline},
    report::ReportKind,
};
use tracing::debug;

/// Report how long failing Allure tests have been failing.
///
/// Reads `*-result.json` files from an Allure results directory and writes a delimited report.
/// With the default `defects` report, each currently failing test is listed with its defect age:
/// the number of consecutive most-recent runs, including the current one, in which it failed.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct DefectAgeApp {
    #[clap(flatten)]
    output_opts: OutputOpts,

    /// Config file [default: .config/defect-age.toml, if present]
    ///
    /// Pass `none` to ignore any config file and use built-in defaults.
    #[arg(long, value_name = "PATH", env = "DEFECT_AGE_CONFIG")]
    config_file: Option<String>,

    /// Allure results directory to read
    #[arg(long, short = 'd', value_name = "DIR")]
    results_dir: Option<Utf8PathBuf>,

    /// History file to compute defect ages from
    ///
    /// Relative paths are resolved against the current directory. By default, the Allure history
    /// store inside the results directory is used.
    #[arg(long, value_name = "PATH")]
    history_file: Option<Utf8PathBuf>,

    /// Don't read any history: every failing test has a defect age of 1
    #[arg(long, conflicts_with = "history_file")]
    no_history: bool,

    /// Path to write the report to
    #[arg(long, short, value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Kind of report to write
    #[arg(long, value_enum, value_name = "KIND")]
    kind: Option<ReportKindOpt>,
}

impl DefectAgeApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output_opts.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        let cwd = current_dir()?;
        self.exec_in(&cwd)
    }

    fn exec_in(self, base_dir: &Utf8Path) -> Result<i32, ExpectedError> {
        let location = ConfigLocation::from_cli(self.config_file.as_deref());
        let overrides = ConfigOverrides {
            results_dir: self.results_dir,
            history_file: self.history_file,
            no_history: self.no_history,
            output: self.output,
            kind: self.kind.map(ReportKind::from),
        };
        let config =
            DefectAgeConfig::load(location, base_dir, &overrides).map_err(ExpectedError::config)?;
        debug!("resolved config: {config:?}");

        match ReportPipeline::new(&config).run()? {
            PipelineOutcome::ResultsDirMissing { .. } => {}
            PipelineOutcome::Written(summary) => {
                debug!(
                    "read {} result file(s), {} invalid, {} record(s) skipped",
                    summary.files_read, summary.invalid_files, summary.skipped_records,
                );
            }
        }

        Ok(DefectAgeExitCode::OK)
    }
}

fn current_dir() -> Result<Utf8PathBuf, ExpectedError> {
    let cwd =
        std::env::current_dir().map_err(|error| ExpectedError::CurrentDirFailed { error })?;
    Utf8PathBuf::try_from(cwd).map_err(|error| ExpectedError::CurrentDirInvalidUtf8 { error })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportKindOpt {
    /// One row per currently failing test, with its defect age
    Defects,
    /// One row per test, with defect and run counts
    Summary,
}

impl From<ReportKindOpt> for ReportKind {
    fn from(opt: ReportKindOpt) -> Self {
        match opt {
            ReportKindOpt::Defects => ReportKind::Defects,
            ReportKindOpt::Summary => ReportKind::Summary,
        }
    }
}
