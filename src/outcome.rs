//! Outcome and result records for a single experiment run
//!
//! An outcome is produced fresh on every execution and never mutated after
//! construction. The experiment result is the aggregate record one `run`
//! call returns: the primary outcome plus everything else observed.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::BehaviorError;

/// A single successful execution: value, elapsed duration, originating name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    name: String,
    value: T,
    duration: Duration,
}

impl<T> Outcome<T> {
    pub(crate) fn new(name: impl Into<String>, value: T, duration: Duration) -> Self {
        Self {
            name: name.into(),
            value,
            duration,
        }
    }

    /// Name of the behavior that produced this outcome.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value the behavior produced.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Consume the outcome, returning its value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Wall-clock time the behavior took. Covers the invocation only;
    /// construction and teardown around it are excluded.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

/// Recorded execution of one candidate during a comparative run.
///
/// A candidate failure is caught and recorded here rather than aborting the
/// run: an experiment must never break the production control path. Control
/// failures are never isolated this way.
#[derive(Debug)]
pub enum CandidateOutcome<T> {
    /// Candidate completed and produced a value.
    Completed(Outcome<T>),
    /// Candidate failed.
    Failed {
        /// Name of the failing candidate.
        name: String,
        /// Elapsed time until the failure surfaced.
        duration: Duration,
        /// The failure itself.
        error: BehaviorError,
    },
}

impl<T> CandidateOutcome<T> {
    /// Name of the candidate this outcome belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Completed(outcome) => outcome.name(),
            Self::Failed { name, .. } => name,
        }
    }

    /// The produced value, if the candidate completed.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Completed(outcome) => Some(outcome.value()),
            Self::Failed { .. } => None,
        }
    }

    /// Elapsed wall-clock duration of the candidate's execution.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Completed(outcome) => outcome.duration(),
            Self::Failed { duration, .. } => *duration,
        }
    }

    /// The failure, if the candidate failed.
    #[must_use]
    pub fn error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error, .. } => Some(error.as_ref()),
        }
    }

    /// Whether the candidate failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// The record returned from one `run` call.
///
/// The primary outcome is the canonical result the caller should use; its
/// behavior name is always either the reserved control name or a candidate
/// name registered at call time. The candidate map records every other
/// behavior observed during the same run and is empty for strategies that
/// execute exactly one behavior.
#[derive(Debug)]
pub struct ExperimentResult<T> {
    primary: Outcome<T>,
    candidates: HashMap<String, CandidateOutcome<T>>,
}

impl<T> ExperimentResult<T> {
    pub(crate) fn new(primary: Outcome<T>) -> Self {
        Self {
            primary,
            candidates: HashMap::new(),
        }
    }

    pub(crate) fn with_candidates(
        primary: Outcome<T>,
        candidates: HashMap<String, CandidateOutcome<T>>,
    ) -> Self {
        Self { primary, candidates }
    }

    /// The primary outcome for this run.
    #[must_use]
    pub const fn primary(&self) -> &Outcome<T> {
        &self.primary
    }

    /// Shorthand for the primary outcome's value.
    #[must_use]
    pub const fn value(&self) -> &T {
        self.primary.value()
    }

    /// Name of the behavior whose outcome is primary.
    #[must_use]
    pub fn behavior_name(&self) -> &str {
        self.primary.name()
    }

    /// Shorthand for the primary outcome's duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.primary.duration()
    }

    /// Outcomes of every other behavior executed during this run, by name.
    #[must_use]
    pub const fn candidate_results(&self) -> &HashMap<String, CandidateOutcome<T>> {
        &self.candidates
    }

    /// Consume the result, returning the primary value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.primary.into_value()
    }
}
