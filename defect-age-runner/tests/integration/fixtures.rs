// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use defect_age_runner::{
    config::{ConfigLocation, ConfigOverrides, DefectAgeConfig},
    pipeline::{PipelineOutcome, ReportPipeline, ReportSummary},
    report::ReportKind,
};
use serde_json::json;
use std::fs;

/// A temporary working directory with an Allure results directory inside it.
pub(crate) struct ResultsFixture {
    temp_dir: Utf8TempDir,
    next_file: usize,
}

impl ResultsFixture {
    pub(crate) const RESULTS_DIR: &'static str = "allure-results";
    pub(crate) const REPORT_PATH: &'static str = "out/report.csv";

    pub(crate) fn new() -> Self {
        let temp_dir = Utf8TempDir::new().expect("created temp dir");
        fs::create_dir(temp_dir.path().join(Self::RESULTS_DIR)).expect("created results dir");
        Self {
            temp_dir,
            next_file: 0,
        }
    }

    /// A working directory without a results directory.
    pub(crate) fn without_results_dir() -> Self {
        Self {
            temp_dir: Utf8TempDir::new().expect("created temp dir"),
            next_file: 0,
        }
    }

    pub(crate) fn base_dir(&self) -> &Utf8Path {
        self.temp_dir.path()
    }

    pub(crate) fn results_dir(&self) -> Utf8PathBuf {
        self.base_dir().join(Self::RESULTS_DIR)
    }

    pub(crate) fn report_path(&self) -> Utf8PathBuf {
        self.base_dir().join(Self::REPORT_PATH)
    }

    /// Writes a result file. Files are named so that they're read in the order they're added.
    pub(crate) fn add_result(&mut self, result: serde_json::Value) -> &mut Self {
        let name = format!("{:04}-result.json", self.next_file);
        self.next_file += 1;
        self.write_raw(&name, &result.to_string());
        self
    }

    pub(crate) fn add_test(
        &mut self,
        history_id: &str,
        full_name: &str,
        status: &str,
        stop: i64,
    ) -> &mut Self {
        self.add_result(json!({
            "uuid": format!("uuid-{}", self.next_file),
            "historyId": history_id,
            "name": full_name.rsplit('.').next(),
            "fullName": full_name,
            "status": status,
            "start": stop - 10,
            "stop": stop,
        }))
    }

    pub(crate) fn write_raw(&self, name: &str, contents: &str) {
        fs::write(self.results_dir().join(name), contents).expect("wrote file");
    }

    /// Writes `history/history.json` inside the results directory.
    pub(crate) fn write_history(&self, history: serde_json::Value) {
        let dir = self.results_dir().join("history");
        fs::create_dir_all(&dir).expect("created history dir");
        fs::write(dir.join("history.json"), history.to_string()).expect("wrote history");
    }

    pub(crate) fn config(&self, kind: ReportKind) -> DefectAgeConfig {
        let overrides = ConfigOverrides {
            results_dir: Some(Self::RESULTS_DIR.into()),
            output: Some(Self::REPORT_PATH.into()),
            kind: Some(kind),
            ..Default::default()
        };
        DefectAgeConfig::load(ConfigLocation::Isolated, self.base_dir(), &overrides)
            .expect("default config is valid")
    }

    /// Runs the pipeline and returns the summary and the report contents.
    pub(crate) fn run(&self, kind: ReportKind) -> (ReportSummary, String) {
        let config = self.config(kind);
        match ReportPipeline::new(&config).run().expect("pipeline succeeded") {
            PipelineOutcome::Written(summary) => {
                let contents = fs::read_to_string(&summary.path).expect("report exists");
                (summary, contents)
            }
            other => panic!("expected a report to be written, got {other:?}"),
        }
    }
}

/// Builds a history entry for `history.json`.
pub(crate) fn history_item(status: &str, stop: i64) -> serde_json::Value {
    json!({
        "uid": format!("uid-{stop}"),
        "status": status,
        "time": { "start": stop - 10, "stop": stop, "duration": 10 },
    })
}
