//! Experiment engine - timed execution, strategy dispatch, completion events
//!
//! A run is synchronous and single-threaded: it blocks the calling thread
//! for the cumulative duration of every behavior the strategy executes,
//! plus observer time. The engine holds no mutable state across runs except
//! its owned random source and the flag that closes observer registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::behavior::{BehaviorFn, BehaviorRegistry, CONTROL_NAME};
use crate::builder::ExperimentBuilder;
use crate::error::{BehaviorError, Error, Result};
use crate::outcome::{CandidateOutcome, ExperimentResult, Outcome};
use crate::strategy::Strategy;

/// Event delivered synchronously to completion observers.
#[derive(Debug)]
pub enum ExperimentEvent<'a, T> {
    /// A candidate finished (completed or failed) during a comparative run.
    /// Gives observers a per-candidate progress stream, not only the final
    /// summary.
    CandidateCompleted(&'a CandidateOutcome<T>),
    /// The run finished; carries the full result record. Fired once per run
    /// for every strategy.
    RunCompleted(&'a ExperimentResult<T>),
}

impl<T> Clone for ExperimentEvent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExperimentEvent<'_, T> {}

/// Completion observer callback type. Invoked on the run caller's thread,
/// in registration order, never retried, never swallowed.
pub type Observer<T> = Box<dyn Fn(ExperimentEvent<'_, T>) + Send + Sync>;

/// Invoke a behavior exactly once, measuring wall-clock time around the
/// invocation only. A failure propagates unmodified; recovery policy
/// belongs to the calling strategy.
fn execute_timed<T>(
    behavior: &BehaviorFn<T>,
) -> (std::result::Result<T, BehaviorError>, Duration) {
    let started = Instant::now();
    let value = behavior();
    (value, started.elapsed())
}

/// A configured experiment: behavior registry, one bound strategy, the
/// completion observers, and an owned random source.
///
/// Construct via [`Experiment::builder`]. `run` may be called any number of
/// times; every run is independent. A single instance may be shared across
/// threads as long as the registered behaviors are themselves safe to
/// invoke concurrently.
pub struct Experiment<T> {
    registry: BehaviorRegistry<T>,
    strategy: Strategy,
    observers: Vec<Observer<T>>,
    rng: Mutex<StdRng>,
    ran: AtomicBool,
}

impl<T> Experiment<T> {
    /// Create a builder with the required control behavior.
    #[must_use]
    pub fn builder(
        control: impl Fn() -> std::result::Result<T, BehaviorError> + Send + Sync + 'static,
    ) -> ExperimentBuilder<T> {
        ExperimentBuilder::new(control)
    }

    pub(crate) fn from_parts(
        registry: BehaviorRegistry<T>,
        strategy: Strategy,
        observers: Vec<Observer<T>>,
        rng: StdRng,
    ) -> Self {
        Self {
            registry,
            strategy,
            observers,
            rng: Mutex::new(rng),
            ran: AtomicBool::new(false),
        }
    }

    /// The behavior registry this experiment runs against.
    #[must_use]
    pub const fn registry(&self) -> &BehaviorRegistry<T> {
        &self.registry
    }

    /// The bound strategy.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Register a completion observer.
    ///
    /// Observers are invoked synchronously during `run`, in registration
    /// order; a slow observer directly extends run latency. Registration
    /// closes permanently once `run` has been called at least once, so a
    /// concurrent runner never races a late registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubscriptionsClosed`] if the experiment has already
    /// run.
    pub fn on_completion(
        &mut self,
        observer: impl Fn(ExperimentEvent<'_, T>) + Send + Sync + 'static,
    ) -> Result<()> {
        if self.ran.load(Ordering::Acquire) {
            return Err(Error::SubscriptionsClosed);
        }
        self.observers.push(Box::new(observer));
        Ok(())
    }

    /// Run one experiment and produce one result record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Behavior`] when the behavior selected as primary
    /// fails (a failing control has failed the run outright and is never
    /// hidden), [`Error::NoCandidates`] when a weighted draw lands on an
    /// empty candidate set, and [`Error::UnknownBehavior`] when a custom
    /// selector breaks its contract.
    pub fn run(&self) -> Result<ExperimentResult<T>> {
        self.ran.store(true, Ordering::Release);

        let result = match &self.strategy {
            Strategy::Comparative => self.run_comparative()?,
            Strategy::RandomWeighted {
                control_probability,
            } => self.run_random_weighted(*control_probability)?,
            Strategy::CustomSelector { selector } => {
                let selected = selector(CONTROL_NAME, &self.registry.candidate_names());
                debug!(selected = selected.as_str(), "selector chose behavior");
                self.run_selected(&selected)?
            }
            Strategy::ControlOnly => ExperimentResult::new(self.execute_control()?),
        };

        self.notify(ExperimentEvent::RunCompleted(&result));
        Ok(result)
    }

    /// Exercise every behavior once; the control's outcome is primary.
    fn run_comparative(&self) -> Result<ExperimentResult<T>> {
        // Control first, unconditionally. Its failure aborts the run before
        // any candidate spends time.
        let primary = self.execute_control()?;

        let mut order: Vec<usize> = (0..self.registry.candidate_count()).collect();
        {
            // Lock held for the shuffle only, never across a behavior call.
            let mut rng = self.lock_rng();
            order.shuffle(&mut *rng);
        }

        let entries = self.registry.entries();
        let mut candidates = HashMap::with_capacity(order.len());
        for index in order {
            let (name, behavior) = &entries[index];
            let (value, duration) = execute_timed(&**behavior);
            let outcome = match value {
                Ok(value) => CandidateOutcome::Completed(Outcome::new(name, value, duration)),
                Err(error) => {
                    warn!(candidate = name.as_str(), %error, "candidate failed; recorded and isolated");
                    CandidateOutcome::Failed {
                        name: name.clone(),
                        duration,
                        error,
                    }
                }
            };
            self.notify(ExperimentEvent::CandidateCompleted(&outcome));
            candidates.insert(name.clone(), outcome);
        }

        Ok(ExperimentResult::with_candidates(primary, candidates))
    }

    /// Run exactly one behavior chosen by a weighted coin flip.
    fn run_random_weighted(&self, control_probability: f64) -> Result<ExperimentResult<T>> {
        // Exactly one draw per run; re-drawing would skew the configured
        // weighting.
        let selected_index = {
            let mut rng = self.lock_rng();
            let roll: f64 = rng.gen();
            if roll < control_probability {
                None
            } else if self.registry.is_empty() {
                return Err(Error::NoCandidates);
            } else {
                Some(rng.gen_range(0..self.registry.candidate_count()))
            }
        };

        match selected_index {
            None => {
                debug!(control_probability, "weighted draw selected control");
                Ok(ExperimentResult::new(self.execute_control()?))
            }
            Some(index) => {
                let (name, behavior) = &self.registry.entries()[index];
                debug!(candidate = name.as_str(), "weighted draw selected candidate");
                Ok(ExperimentResult::new(
                    self.execute_primary(name, &**behavior)?,
                ))
            }
        }
    }

    /// Run exactly the behavior a selector named.
    fn run_selected(&self, name: &str) -> Result<ExperimentResult<T>> {
        if name == CONTROL_NAME {
            return Ok(ExperimentResult::new(self.execute_control()?));
        }
        let behavior = self
            .registry
            .candidate(name)
            .ok_or_else(|| Error::UnknownBehavior(name.to_string()))?;
        Ok(ExperimentResult::new(self.execute_primary(name, behavior)?))
    }

    fn execute_control(&self) -> Result<Outcome<T>> {
        self.execute_primary(CONTROL_NAME, self.registry.control())
    }

    /// Execute a behavior whose outcome will be primary. Its failure fails
    /// the run; there is nothing to isolate it behind.
    fn execute_primary(&self, name: &str, behavior: &BehaviorFn<T>) -> Result<Outcome<T>> {
        let (value, duration) = execute_timed(behavior);
        match value {
            Ok(value) => Ok(Outcome::new(name, value, duration)),
            Err(source) => Err(Error::Behavior {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn notify(&self, event: ExperimentEvent<'_, T>) {
        for observer in &self.observers {
            observer(event);
        }
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        // A poisoned lock only means another caller panicked mid-draw; the
        // generator state is still usable.
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for Experiment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Experiment")
            .field("registry", &self.registry)
            .field("strategy", &self.strategy)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
