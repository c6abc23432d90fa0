//! Selection strategies - the policy deciding which behaviors run
//!
//! The strategies are variants of one capability (produce an experiment
//! result from a behavior registry), so they form a closed tagged variant.
//! New policies are composed by construction, not by subclassing.

use std::fmt;

use crate::error::{Error, Result};

/// Selector signature for [`Strategy::CustomSelector`]: a pure function from
/// (reserved control name, ordered candidate names) to the name of the one
/// behavior to run.
pub type Selector = Box<dyn Fn(&str, &[String]) -> String + Send + Sync>;

/// Policy deciding which behaviors execute during a run and which outcome
/// becomes primary. Exactly one strategy is bound per experiment, immutable
/// thereafter.
pub enum Strategy {
    /// Execute every registered behavior exactly once; the control's outcome
    /// is always the one returned as primary. Candidates run in a freshly
    /// shuffled order each run so no candidate systematically benefits from
    /// effects like cache warm-up.
    Comparative,

    /// Execute exactly one behavior, chosen by a weighted coin flip:
    /// representative candidate exposure without doubling real work.
    RandomWeighted {
        /// Probability in `[0, 1]` of selecting the control. A uniform draw
        /// below this threshold runs the control; anything else runs one
        /// uniformly chosen candidate. `1.0` always selects the control,
        /// `0.0` never does.
        control_probability: f64,
    },

    /// Execute exactly one behavior, chosen by caller-supplied logic.
    /// Enables deterministic tests, canary-by-attribute selection, or
    /// sticky-session policies.
    CustomSelector {
        /// Called once per run. Returning a name outside the valid set is a
        /// contract violation surfaced as
        /// [`Error::UnknownBehavior`](crate::Error::UnknownBehavior), never
        /// a silent fallback.
        selector: Selector,
    },

    /// Execute only the control. The explicit opt-in for zero-candidate
    /// configurations.
    ControlOnly,
}

impl Strategy {
    /// Default control probability for [`Strategy::RandomWeighted`].
    pub const DEFAULT_CONTROL_PROBABILITY: f64 = 0.5;

    /// Weighted random selection with the default control probability.
    #[must_use]
    pub const fn random_weighted() -> Self {
        Self::RandomWeighted {
            control_probability: Self::DEFAULT_CONTROL_PROBABILITY,
        }
    }

    /// Whether this strategy structurally requires at least one candidate.
    #[must_use]
    pub const fn requires_candidates(&self) -> bool {
        matches!(self, Self::Comparative | Self::RandomWeighted { .. })
    }

    /// Validate strategy parameters.
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::RandomWeighted {
                control_probability,
            } if !(0.0..=1.0).contains(control_probability) => {
                Err(Error::InvalidProbability(*control_probability))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparative => f.write_str("Comparative"),
            Self::RandomWeighted {
                control_probability,
            } => f
                .debug_struct("RandomWeighted")
                .field("control_probability", control_probability)
                .finish(),
            Self::CustomSelector { .. } => f.write_str("CustomSelector"),
            Self::ControlOnly => f.write_str("ControlOnly"),
        }
    }
}
