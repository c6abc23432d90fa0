//! Fluent construction of experiments
//!
//! Every configuration error surfaces at the call that caused it (duplicate
//! candidate names at `candidate`, double strategy binding and bad
//! probabilities at the binding call), never at run time.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::behavior::BehaviorRegistry;
use crate::error::{BehaviorError, Error, Result};
use crate::experiment::{Experiment, ExperimentEvent, Observer};
use crate::strategy::Strategy;

/// Builder for [`Experiment`].
///
/// The control behavior is required and supplied once, at construction.
/// Exactly one strategy may be bound; when none is, [`build`](Self::build)
/// falls back to [`Strategy::ControlOnly`].
///
/// ```rust
/// use contender::Experiment;
///
/// let experiment = Experiment::builder(|| Ok("baseline".len()))
///     .candidate("chars", || Ok("baseline".chars().count()))?
///     .comparative()?
///     .build()?;
/// # Ok::<(), contender::Error>(())
/// ```
pub struct ExperimentBuilder<T> {
    registry: BehaviorRegistry<T>,
    strategy: Option<Strategy>,
    observers: Vec<Observer<T>>,
    allow_control_only: bool,
    rng: Option<StdRng>,
}

impl<T> ExperimentBuilder<T> {
    /// Create a builder with the required control behavior.
    #[must_use]
    pub fn new(
        control: impl Fn() -> std::result::Result<T, BehaviorError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            registry: BehaviorRegistry::new(control),
            strategy: None,
            observers: Vec::new(),
            allow_control_only: false,
            rng: None,
        }
    }

    /// Register a named candidate behavior.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCandidate`] for an already-registered name
    /// and [`Error::ReservedName`] for the reserved control name.
    pub fn candidate(
        mut self,
        name: impl Into<String>,
        behavior: impl Fn() -> std::result::Result<T, BehaviorError> + Send + Sync + 'static,
    ) -> Result<Self> {
        self.registry.register_candidate(name, behavior)?;
        Ok(self)
    }

    /// Bind the comparative strategy: run everything, return the control.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyAlreadyBound`] if a strategy is bound.
    pub fn comparative(self) -> Result<Self> {
        self.bind(Strategy::Comparative)
    }

    /// Bind weighted random selection with the given control probability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyAlreadyBound`] if a strategy is bound and
    /// [`Error::InvalidProbability`] when the probability is outside
    /// `[0, 1]`.
    pub fn random_weighted(self, control_probability: f64) -> Result<Self> {
        self.bind(Strategy::RandomWeighted {
            control_probability,
        })
    }

    /// Bind weighted random selection with the default control probability
    /// ([`Strategy::DEFAULT_CONTROL_PROBABILITY`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyAlreadyBound`] if a strategy is bound.
    pub fn random_weighted_default(self) -> Result<Self> {
        self.bind(Strategy::random_weighted())
    }

    /// Bind selection by caller-supplied logic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyAlreadyBound`] if a strategy is bound.
    pub fn custom_selector(
        self,
        selector: impl Fn(&str, &[String]) -> String + Send + Sync + 'static,
    ) -> Result<Self> {
        self.bind(Strategy::CustomSelector {
            selector: Box::new(selector),
        })
    }

    /// Bind the control-only strategy explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyAlreadyBound`] if a strategy is bound.
    pub fn control_only(self) -> Result<Self> {
        self.bind(Strategy::ControlOnly)
    }

    fn bind(mut self, strategy: Strategy) -> Result<Self> {
        if self.strategy.is_some() {
            return Err(Error::StrategyAlreadyBound);
        }
        strategy.validate()?;
        self.strategy = Some(strategy);
        Ok(self)
    }

    /// Permit building a candidate-requiring strategy with zero candidates.
    ///
    /// The run then degenerates to control-only behavior; a weighted draw
    /// that still lands on the candidate branch fails with
    /// [`Error::NoCandidates`] at run time.
    #[must_use]
    pub fn allow_control_only(mut self) -> Self {
        self.allow_control_only = true;
        self
    }

    /// Seed the experiment's owned random source for deterministic runs.
    /// Unseeded experiments draw their generator from OS entropy.
    #[must_use]
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Register a completion observer, invoked synchronously in
    /// registration order during every run.
    #[must_use]
    pub fn on_completion(
        mut self,
        observer: impl Fn(ExperimentEvent<'_, T>) + Send + Sync + 'static,
    ) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCandidates`] when the bound strategy structurally
    /// requires candidates, none are registered, and
    /// [`allow_control_only`](Self::allow_control_only) was not set.
    pub fn build(self) -> Result<Experiment<T>> {
        let strategy = self.strategy.unwrap_or(Strategy::ControlOnly);
        if strategy.requires_candidates() && self.registry.is_empty() && !self.allow_control_only {
            return Err(Error::NoCandidates);
        }
        Ok(Experiment::from_parts(
            self.registry,
            strategy,
            self.observers,
            self.rng.unwrap_or_else(StdRng::from_entropy),
        ))
    }
}

impl<T> std::fmt::Debug for ExperimentBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExperimentBuilder")
            .field("registry", &self.registry)
            .field("strategy", &self.strategy)
            .field("observers", &self.observers.len())
            .field("allow_control_only", &self.allow_control_only)
            .finish_non_exhaustive()
    }
}
