// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{ResultsFixture, history_item};
use defect_age_runner::{
    config::{ConfigLocation, ConfigOverrides, DEFAULT_CONFIG_PATH, DefectAgeConfig},
    errors::ConfigError,
    pipeline::{HistoryStatus, PipelineOutcome, ReportPipeline},
    report::ReportKind,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

fn write_config(fixture: &ResultsFixture, contents: &str) {
    let path = fixture.base_dir().join(DEFAULT_CONFIG_PATH);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn config_file_drives_pipeline() {
    let mut fixture = ResultsFixture::new();
    fixture
        .add_test("a", "crate::module::fails", "failed", 100)
        .add_test("b", "crate::module::passes", "passed", 100);
    fixture.write_history(json!({
        "a": { "items": [history_item("failed", 50)] },
    }));
    write_config(
        &fixture,
        indoc! {r#"
            [input]
            results-dir = "allure-results"
            use-history = false

            [report]
            path = "reports/defects.tsv"
            delimiter = "\t"
            delimiter-substitute = " "

            [naming]
            separators = ["::"]
        "#},
    );

    let config = DefectAgeConfig::load(
        ConfigLocation::Default,
        fixture.base_dir(),
        &ConfigOverrides::default(),
    )
    .unwrap();
    let PipelineOutcome::Written(summary) = ReportPipeline::new(&config).run().unwrap() else {
        panic!("expected a report to be written");
    };

    assert_eq!(summary.path, fixture.base_dir().join("reports/defects.tsv"));
    // History is disabled, so the earlier failure isn't counted.
    assert_eq!(summary.history, HistoryStatus::Unused);
    assert_eq!(
        fs::read_to_string(&summary.path).unwrap(),
        "Class_Name\tTest_Name\tDefect_Age_Builds\tError_Message\tShort_Trace\n\
         crate::module\tfails\t1\t\t\n"
    );

    // Command-line overrides take precedence over the config file.
    let overrides = ConfigOverrides {
        history_file: Some("allure-results/history/history.json".into()),
        kind: Some(ReportKind::Summary),
        ..Default::default()
    };
    let config = DefectAgeConfig::load(ConfigLocation::Default, fixture.base_dir(), &overrides)
        .unwrap();
    assert_eq!(config.report.kind, ReportKind::Summary);
    assert_eq!(
        config.input.history_file,
        Some(fixture.results_dir().join("history/history.json"))
    );
}

#[test]
fn isolated_ignores_config_file() {
    let mut fixture = ResultsFixture::new();
    fixture.add_test("a", "pkg.A.test", "failed", 1);
    write_config(&fixture, "[report]\nkind = \"summary\"\n");

    let (summary, _) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.kind, ReportKind::Defects);

    let config = DefectAgeConfig::load(
        ConfigLocation::Isolated,
        fixture.base_dir(),
        &ConfigOverrides::default(),
    )
    .unwrap();
    assert_eq!(config.report.kind, ReportKind::Defects);
}

#[test]
fn invalid_config_values() {
    let fixture = ResultsFixture::new();
    write_config(
        &fixture,
        indoc! {r#"
            [report]
            delimiter = ";"
        "#},
    );

    let error = DefectAgeConfig::load(
        ConfigLocation::Default,
        fixture.base_dir(),
        &ConfigOverrides::default(),
    )
    .unwrap_err();
    assert!(
        matches!(
            error,
            ConfigError::InvalidValue {
                key: "report.delimiter-substitute",
                ..
            }
        ),
        "{error:?}"
    );
}
