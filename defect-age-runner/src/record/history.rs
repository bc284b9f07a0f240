// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::HistoryReadError, outcome::TestOutcome, streak::streak_age};
use camino::Utf8Path;
use defect_age_metadata::{AllureHistory, AllureHistoryItem};
use std::{collections::HashMap, fs, io, num::NonZero};
use tracing::debug;

/// A previously completed run of a test, as recorded in the history store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// The outcome of the run. A missing status is [`TestOutcome::Unknown`].
    pub outcome: TestOutcome,

    /// When the run completed, in milliseconds since the Unix epoch.
    pub completed_at: Option<i64>,
}

impl HistoryEntry {
    /// Creates a new history entry.
    pub fn new(outcome: TestOutcome, completed_at: Option<i64>) -> Self {
        Self {
            outcome,
            completed_at,
        }
    }
}

impl From<&AllureHistoryItem> for HistoryEntry {
    fn from(item: &AllureHistoryItem) -> Self {
        Self {
            outcome: TestOutcome::from_status(item.status.as_deref()),
            completed_at: item.stop(),
        }
    }
}

/// Prior runs of each test, keyed by identity.
///
/// The store is read-only input: defect-age never writes it back.
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    tests: HashMap<String, Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Loads the store from an Allure `history.json` file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load(path: &Utf8Path) -> Result<Option<Self>, HistoryReadError> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("history: no store at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(HistoryReadError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        let history: AllureHistory =
            serde_json::from_slice(&contents).map_err(|error| HistoryReadError::Parse {
                path: path.to_owned(),
                error,
            })?;

        let store = Self::from_allure(&history);
        debug!("history: loaded {} tests from {path}", store.len());
        Ok(Some(store))
    }

    /// Builds a store from a parsed Allure history.
    pub fn from_allure(history: &AllureHistory) -> Self {
        history
            .tests
            .iter()
            .map(|(identity, entry)| {
                (
                    identity.clone(),
                    entry.items.iter().map(HistoryEntry::from).collect(),
                )
            })
            .collect()
    }

    /// Returns the number of identities in the store.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns true if the store has no identities.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Returns the entries for `identity` in store order, or `None` if the identity is absent.
    pub fn entries(&self, identity: &str) -> Option<&[HistoryEntry]> {
        self.tests.get(identity).map(Vec::as_slice)
    }

    /// Returns the outcomes recorded for `identity`, most recent first.
    ///
    /// Entries are ordered by completion time, descending. Entries without a completion time
    /// sort last, as the oldest. Entries with equal completion times keep their store order.
    ///
    /// An absent identity produces an empty list.
    pub fn outcomes_most_recent_first(&self, identity: &str) -> Vec<TestOutcome> {
        let mut entries = self.entries(identity).unwrap_or_default().to_vec();
        sort_most_recent_first(&mut entries);
        entries.into_iter().map(|entry| entry.outcome).collect()
    }

    /// Returns the defect age of `identity` given its outcome in the current batch.
    ///
    /// Returns `None` if `current` is not a defect.
    pub fn age_for(&self, identity: &str, current: TestOutcome) -> Option<NonZero<usize>> {
        if !current.is_defect() {
            return None;
        }
        streak_age(current, self.outcomes_most_recent_first(identity))
    }
}

impl FromIterator<(String, Vec<HistoryEntry>)> for HistoryStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<HistoryEntry>)>>(iter: I) -> Self {
        Self {
            tests: iter.into_iter().collect(),
        }
    }
}

/// Sorts history entries by completion time, most recent first.
///
/// The sort is stable; `None` compares lower than any `Some`, so entries without a completion
/// time end up last.
pub(crate) fn sort_most_recent_first(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
}
