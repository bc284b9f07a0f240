// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::BTreeMap;

/// The suffix shared by all Allure test result files in a results directory.
pub const RESULT_FILE_SUFFIX: &str = "-result.json";

/// A single Allure test result, as written to `<uuid>-result.json`.
///
/// Only the fields `defect-age` consumes are modeled. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllureTestResult {
    /// The unique ID of this particular execution.
    #[serde(default, deserialize_with = "lenient_text")]
    pub uuid: Option<String>,

    /// The stable identity of the logical test across executions.
    #[serde(default, deserialize_with = "lenient_text")]
    pub history_id: Option<String>,

    /// The short display name of the test.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    /// The fully-qualified name of the test, typically `package.Class.method`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,

    /// The status string: `passed`, `failed`, `broken`, `skipped` or `unknown`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,

    /// Failure details, present for failed and broken tests.
    #[serde(default, deserialize_with = "lenient")]
    pub status_details: Option<AllureStatusDetails>,

    /// Start time, in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub start: Option<i64>,

    /// Stop time, in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub stop: Option<i64>,
}

/// The `statusDetails` object of an Allure result or history item.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct AllureStatusDetails {
    /// The failure message.
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,

    /// The failure stack trace.
    #[serde(default, deserialize_with = "lenient_text")]
    pub trace: Option<String>,
}

/// The Allure history store (`history/history.json`), keyed by history ID.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AllureHistory {
    /// Map of history ID to the recorded runs for that test.
    ///
    /// Values that are not objects are dropped, as if the history ID were absent.
    #[serde(deserialize_with = "lenient_map")]
    pub tests: BTreeMap<String, AllureHistoryEntry>,
}

/// The recorded history of a single test.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct AllureHistoryEntry {
    /// Previous runs of this test, in no guaranteed order.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<AllureHistoryItem>,
}

/// A single previous run within an [`AllureHistoryEntry`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllureHistoryItem {
    /// The unique ID of the recorded run.
    #[serde(default, deserialize_with = "lenient_text")]
    pub uid: Option<String>,

    /// The status string of the recorded run.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,

    /// Timing information for the recorded run.
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<AllureTime>,
}

/// The `time` object of an Allure history item.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct AllureTime {
    /// Start time, in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub start: Option<i64>,

    /// Stop time, in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub stop: Option<i64>,

    /// Duration in milliseconds.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub duration: Option<i64>,
}

impl AllureHistoryItem {
    /// Returns the stop time of this run, if recorded.
    pub fn stop(&self) -> Option<i64> {
        self.time.and_then(|time| time.stop)
    }
}

// ---
// Lenient field deserializers
// ---

/// Scalars become their textual form; null, arrays and objects become `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => None,
    })
}

/// Integers, floats (truncated) and numeric strings are accepted.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(values)) = value else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .filter(|(_, value)| value.is_object())
        .filter_map(|(key, value)| Some((key, serde_json::from_value(value).ok()?)))
        .collect())
}
