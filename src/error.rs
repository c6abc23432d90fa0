//! Error types for contender
//!
//! Configuration errors surface at the call that caused them, never deferred
//! to run time. Execution errors from the primary behavior surface from
//! `run` unmodified. There are no retries anywhere: every failure is a
//! one-shot, immediately visible condition.

use thiserror::Error;

use crate::behavior::CONTROL_NAME;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a behavior itself during execution.
pub type BehaviorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Contender error types
#[derive(Error, Debug)]
pub enum Error {
    /// A candidate with this name is already registered
    #[error("candidate {0:?} is already registered\nDuplicate registration would silently replace a behavior; rename the candidate")]
    DuplicateCandidate(String),

    /// A candidate tried to use the reserved control name
    #[error("candidate name {CONTROL_NAME:?} is reserved for the control behavior")]
    ReservedName,

    /// The bound strategy structurally requires at least one candidate
    #[error("strategy requires at least one candidate\nRegister a candidate, or opt in to a degenerate run with `allow_control_only`")]
    NoCandidates,

    /// A second strategy was bound to one experiment configuration
    #[error("a strategy is already bound to this experiment; strategy binding is one-shot")]
    StrategyAlreadyBound,

    /// Control probability outside the unit interval
    #[error("control probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// A custom selector returned a name outside the valid set
    #[error("selector returned unknown behavior {0:?}; expected {CONTROL_NAME:?} or a registered candidate name")]
    UnknownBehavior(String),

    /// Observer registration attempted after the first run
    #[error("observers cannot be registered once the experiment has run")]
    SubscriptionsClosed,

    /// The behavior selected as primary failed during a run
    #[error("behavior {name:?} failed: {source}")]
    Behavior {
        /// Name of the failing behavior
        name: String,
        /// The underlying failure
        #[source]
        source: BehaviorError,
    },
}

impl Error {
    /// Name of the failing behavior, when this is an execution failure.
    #[must_use]
    pub fn behavior_name(&self) -> Option<&str> {
        match self {
            Self::Behavior { name, .. } => Some(name),
            _ => None,
        }
    }
}
