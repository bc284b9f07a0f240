// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{ResultsFixture, history_item};
use defect_age_runner::{
    errors::{PipelineError, ResultsReadError},
    pipeline::{HistoryStatus, PipelineOutcome, ReportPipeline},
    record::InvalidRecordPolicy,
    report::ReportKind,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

#[test]
fn failed_and_passed_tests() {
    let mut fixture = ResultsFixture::new();
    fixture
        .add_test("a", "com.example.ATest.testA", "failed", 100)
        .add_test("b", "com.example.BTest.testB", "passed", 100);

    let (summary, contents) = fixture.run(ReportKind::Summary);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.files_read, 2);
    assert_eq!(summary.history, HistoryStatus::Unused);
    assert_eq!(
        contents,
        indoc! {"
            Class Name,Test Name,Defect Count,Total Runs,Defect Age
            com.example.ATest,testA,1,1,1
            com.example.BTest,testB,0,1,0
        "}
    );

    let (summary, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.history, HistoryStatus::Missing);
    assert_eq!(
        contents,
        indoc! {"
            Class_Name,Test_Name,Defect_Age_Builds,Error_Message,Short_Trace
            com.example.ATest,testA,1,,
        "}
    );
}

#[test]
fn missing_results_dir_writes_nothing() {
    let fixture = ResultsFixture::without_results_dir();
    let config = fixture.config(ReportKind::Defects);

    let outcome = ReportPipeline::new(&config).run().unwrap();
    assert_eq!(
        outcome,
        PipelineOutcome::ResultsDirMissing {
            path: fixture.results_dir(),
        }
    );
    assert!(!fixture.report_path().exists());
}

#[test]
fn empty_results_dir_writes_header() {
    let fixture = ResultsFixture::new();
    fixture.write_raw("0000-container.json", "{}");

    let (summary, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.rows, 0);
    assert_eq!(summary.files_read, 0);
    assert_eq!(
        contents,
        "Class_Name,Test_Name,Defect_Age_Builds,Error_Message,Short_Trace\n"
    );
}

#[test]
fn history_streaks() {
    let mut fixture = ResultsFixture::new();
    fixture
        // Failing for a while, with a pass further back.
        .add_test("streak", "suite.Streak.test", "failed", 1000)
        // Failed before, but passed in the run before this one.
        .add_test("fresh", "suite.Fresh.test", "broken", 1000)
        // Unknown to history.
        .add_test("new", "suite.New.test", "FAILED", 1000)
        // Passing now, so never reported.
        .add_test("fixed", "suite.Fixed.test", "passed", 1000);
    fixture.write_history(json!({
        "streak": {
            "items": [
                history_item("failed", 900),
                history_item("passed", 600),
                history_item("broken", 800),
                history_item("failed", 700),
                history_item("failed", 500),
            ],
        },
        "fresh": {
            "items": [history_item("passed", 900), history_item("failed", 800)],
        },
        "fixed": {
            "items": [history_item("failed", 900)],
        },
    }));

    let (summary, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.history, HistoryStatus::Loaded { tests: 3 });
    assert_eq!(
        contents,
        indoc! {"
            Class_Name,Test_Name,Defect_Age_Builds,Error_Message,Short_Trace
            suite.Streak,test,4,,
            suite.Fresh,test,1,,
            suite.New,test,1,,
        "}
    );
}

#[test]
fn malformed_history_entries_are_ignored() {
    let mut fixture = ResultsFixture::new();
    fixture.add_test("a", "pkg.A.test", "failed", 10);
    fixture.write_history(json!({
        "a": { "items": [history_item("failed", 5)] },
        "other": null,
    }));

    let (summary, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.history, HistoryStatus::Loaded { tests: 1 });
    assert_eq!(
        contents,
        indoc! {"
            Class_Name,Test_Name,Defect_Age_Builds,Error_Message,Short_Trace
            pkg.A,test,2,,
        "}
    );
}

#[test]
fn batch_aggregation_and_diagnostics() {
    let mut fixture = ResultsFixture::new();
    fixture
        .add_result(json!({
            "historyId": "a",
            "fullName": "pkg.Login#works",
            "status": "failed",
            "statusDetails": {
                "message": "expected 200,\r\ngot 500",
                "trace": "AssertionError: expected 200, got 500\n\tat pkg.Login.works(Login.java:12)",
            },
            "stop": 20,
        }))
        .add_result(json!({
            "historyId": "a",
            "fullName": "pkg.Login#works",
            "status": "passed",
            "stop": 10,
        }))
        // Records without an identity or a name are skipped.
        .add_result(json!({"fullName": "pkg.Login#orphan", "status": "failed"}))
        .add_result(json!({"historyId": "nameless", "status": "failed"}))
        // A test known only by its short name.
        .add_result(json!({"historyId": "b", "name": "smoke test", "status": "broken"}));

    let (summary, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.skipped_records, 2);
    assert_eq!(
        contents,
        indoc! {"
            Class_Name,Test_Name,Defect_Age_Builds,Error_Message,Short_Trace
            UnknownClass,smoke test,1,,
            pkg.Login,works,1,expected 200; got 500,AssertionError: expected 200; got 500
        "}
    );

    let (_, contents) = fixture.run(ReportKind::Summary);
    assert_eq!(
        contents,
        indoc! {"
            Class Name,Test Name,Defect Count,Total Runs,Defect Age
            UnknownClass,smoke test,1,1,1
            pkg.Login,works,1,2,1
        "}
    );
}

#[test]
fn invalid_result_files() {
    let mut fixture = ResultsFixture::new();
    fixture.add_test("a", "pkg.A.test", "failed", 1);
    fixture.write_raw("9999-result.json", "{ truncated");

    let (summary, _) = fixture.run(ReportKind::Defects);
    assert_eq!(summary.files_read, 1);
    assert_eq!(summary.invalid_files, 1);
    assert_eq!(summary.rows, 1);

    let mut config = fixture.config(ReportKind::Defects);
    config.input.invalid_records = InvalidRecordPolicy::Fail;
    let error = ReportPipeline::new(&config).run().unwrap_err();
    assert!(
        matches!(
            error,
            PipelineError::ResultsRead(ResultsReadError::Parse { .. })
        ),
        "{error:?}"
    );
}

#[test]
fn invalid_history_is_an_error() {
    let mut fixture = ResultsFixture::new();
    fixture.add_test("a", "pkg.A.test", "failed", 1);
    let history_dir = fixture.results_dir().join("history");
    fs::create_dir_all(&history_dir).unwrap();
    fs::write(history_dir.join("history.json"), "not json").unwrap();

    let config = fixture.config(ReportKind::Defects);
    let error = ReportPipeline::new(&config).run().unwrap_err();
    assert!(matches!(error, PipelineError::HistoryRead(_)), "{error:?}");
    assert!(!fixture.report_path().exists());
}

#[test]
fn report_is_replaced() {
    let mut fixture = ResultsFixture::new();
    fixture.add_test("a", "pkg.A.test", "failed", 1);
    fs::create_dir_all(fixture.report_path().parent().unwrap()).unwrap();
    fs::write(fixture.report_path(), "old report\n".repeat(100)).unwrap();

    let (_, contents) = fixture.run(ReportKind::Defects);
    assert_eq!(contents.lines().count(), 2);
    assert!(!contents.contains("old report"));
}
