// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folding the current batch into one accumulator per test identity.

use crate::{
    naming::{NameSplitter, TestNames},
    outcome::TestOutcome,
    record::{Diagnostic, TestRunRecord},
};
use std::collections::{HashMap, hash_map};
use tracing::debug;

/// What happened to a record passed to [`Aggregator::add`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordDisposition {
    /// The record was folded into an accumulator.
    Aggregated,

    /// The record has no identity and was skipped.
    MissingIdentity,

    /// The record has neither a full name nor a name, and was skipped.
    MissingName,
}

/// Groups test-run records by identity.
#[derive(Clone, Debug)]
pub struct Aggregator {
    splitter: NameSplitter,
    tests: HashMap<String, TestAccumulator>,
    skipped_records: usize,
}

impl Aggregator {
    /// Creates a new aggregator that derives class and test names with `splitter`.
    pub fn new(splitter: NameSplitter) -> Self {
        Self {
            splitter,
            tests: HashMap::new(),
            skipped_records: 0,
        }
    }

    /// Folds a record into the accumulator for its identity, creating the accumulator on first
    /// sight.
    ///
    /// Records without an identity or a qualified name are skipped and don't affect any counter.
    pub fn add(&mut self, record: TestRunRecord) -> RecordDisposition {
        let TestRunRecord {
            identity,
            qualified_name,
            outcome,
            diagnostic,
            completed_at,
        } = record;

        let Some(identity) = identity else {
            debug!(
                "skipping record without identity (name: {})",
                qualified_name.as_deref().unwrap_or("<none>"),
            );
            self.skipped_records += 1;
            return RecordDisposition::MissingIdentity;
        };
        let Some(qualified_name) = qualified_name else {
            debug!("skipping record without name (identity: {identity})");
            self.skipped_records += 1;
            return RecordDisposition::MissingName;
        };

        let run = CurrentRun {
            outcome,
            completed_at,
        };
        match self.tests.entry(identity) {
            hash_map::Entry::Occupied(mut entry) => {
                entry.get_mut().fold(run, diagnostic);
            }
            hash_map::Entry::Vacant(entry) => {
                // First-seen naming wins: later records for the same identity never rename it.
                let names = self.splitter.split(&qualified_name);
                let mut acc = TestAccumulator::new(entry.key().clone(), names, run);
                acc.fold(run, diagnostic);
                entry.insert(acc);
            }
        }

        RecordDisposition::Aggregated
    }

    /// Folds every record from `records`.
    pub fn extend(&mut self, records: impl IntoIterator<Item = TestRunRecord>) {
        for record in records {
            self.add(record);
        }
    }

    /// Returns the number of distinct identities seen so far.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns true if no records have been aggregated.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Finishes aggregation.
    pub fn finish(self) -> AggregatedBatch {
        let mut tests: Vec<_> = self.tests.into_values().collect();
        tests.sort_unstable_by(|a, b| a.identity.cmp(&b.identity));
        debug!(
            "aggregated {} tests, skipped {} records",
            tests.len(),
            self.skipped_records,
        );
        AggregatedBatch {
            tests,
            skipped_records: self.skipped_records,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(NameSplitter::default())
    }
}

/// The result of aggregating a batch.
#[derive(Clone, Debug, Default)]
pub struct AggregatedBatch {
    /// One accumulator per identity, sorted by identity.
    pub tests: Vec<TestAccumulator>,

    /// The number of records skipped for lacking an identity or a name.
    pub skipped_records: usize,
}

/// The run of a test considered current: the one that completed last.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurrentRun {
    /// The outcome of the run.
    pub outcome: TestOutcome,

    /// When the run completed, in milliseconds since the Unix epoch.
    pub completed_at: Option<i64>,
}

impl CurrentRun {
    // Ties, and runs without a completion time on either side, go to the later-folded run.
    fn is_superseded_by(&self, other: &CurrentRun) -> bool {
        match (self.completed_at, other.completed_at) {
            (Some(current), Some(other)) => other >= current,
            _ => true,
        }
    }
}

/// Per-identity counters for one batch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestAccumulator {
    identity: String,
    names: TestNames,
    total_runs: usize,
    defect_count: usize,
    current: CurrentRun,
    last_defect: Option<(CurrentRun, Diagnostic)>,
}

impl TestAccumulator {
    fn new(identity: String, names: TestNames, current: CurrentRun) -> Self {
        Self {
            identity,
            names,
            total_runs: 0,
            defect_count: 0,
            current,
            last_defect: None,
        }
    }

    fn fold(&mut self, run: CurrentRun, diagnostic: Diagnostic) {
        self.total_runs += 1;
        if run.outcome.is_defect() {
            self.defect_count += 1;
            let supersedes = self
                .last_defect
                .as_ref()
                .is_none_or(|(last, _)| last.is_superseded_by(&run));
            if supersedes {
                self.last_defect = Some((run, diagnostic));
            }
        }
        if self.current.is_superseded_by(&run) {
            self.current = run;
        }
    }

    /// The identity of the test.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The class name, derived from the first record seen for this identity.
    pub fn class_name(&self) -> &str {
        &self.names.class_name
    }

    /// The test name, derived from the first record seen for this identity.
    pub fn test_name(&self) -> &str {
        &self.names.test_name
    }

    /// The number of runs of this test in the batch.
    pub fn total_runs(&self) -> usize {
        self.total_runs
    }

    /// The number of runs in the batch with a defect outcome. Never exceeds
    /// [`total_runs`](Self::total_runs).
    pub fn defect_count(&self) -> usize {
        self.defect_count
    }

    /// The most recent run of this test in the batch.
    pub fn current(&self) -> CurrentRun {
        self.current
    }

    /// The diagnostic of the most recent defect run, if any.
    ///
    /// "Most recent" is decided the same way as for [`current`](Self::current), so when the
    /// current run is a defect, this is its diagnostic.
    pub fn last_defect(&self) -> Option<&Diagnostic> {
        self.last_defect.as_ref().map(|(_, diagnostic)| diagnostic)
    }
}
