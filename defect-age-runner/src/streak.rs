// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolving defect ages.
//!
//! The defect age of a test is the number of consecutive most-recent runs, including the current
//! one, whose outcome was a defect (`failed` or `broken`). For example, with a current failure and
//! a history of `[failed, failed, passed, failed]` (most recent first), the age is 3: the current
//! run plus the two leading failures. The failure before the pass is not part of the streak.

use crate::{outcome::TestOutcome, record::HistoryStore};
use std::num::NonZero;

/// Computes the defect age of a test from its current outcome and its prior outcomes.
///
/// `history` must already be ordered most recent first; see
/// [`HistoryStore::outcomes_most_recent_first`]. The walk stops at the first non-defect outcome.
///
/// Returns `None` if `current` is not a defect: only failing tests have an age.
pub fn streak_age<I>(current: TestOutcome, history: I) -> Option<NonZero<usize>>
where
    I: IntoIterator<Item = TestOutcome>,
{
    if !current.is_defect() {
        return None;
    }

    let prior = history
        .into_iter()
        .take_while(|outcome| outcome.is_defect())
        .count();
    Some(NonZero::<usize>::MIN.saturating_add(prior))
}

/// Computes the defect age of the test identified by `identity`, consulting the history store if
/// one is available.
///
/// A missing store, or a store without an entry for `identity`, means the streak is just the
/// current run.
pub fn resolve_age(
    identity: &str,
    current: TestOutcome,
    history: Option<&HistoryStore>,
) -> Option<NonZero<usize>> {
    match history {
        Some(store) => store.age_for(identity, current),
        None => streak_age(current, []),
    }
}
