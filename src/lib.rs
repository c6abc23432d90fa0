//! # Contender: Experiment Execution Engine
//!
//! Contender runs one trusted **control** computation alongside one or more
//! behaviorally interchangeable **candidate** computations, under a
//! pluggable selection strategy, measuring per-run wall-clock timing. Each
//! run returns a single canonical outcome plus a record of what else ran
//! and how long it took. Use it to validate a replacement implementation
//! against a known-good baseline in production-like conditions without
//! destabilizing the caller's observed behavior.
//!
//! ## Strategies
//!
//! - [`Strategy::Comparative`] - run everything once; the control's outcome
//!   is always the one returned, and candidate failures are recorded, never
//!   propagated.
//! - [`Strategy::RandomWeighted`] - run exactly one behavior, chosen by a
//!   weighted coin flip.
//! - [`Strategy::CustomSelector`] - run exactly one behavior, chosen by
//!   caller-supplied logic.
//! - [`Strategy::ControlOnly`] - run only the control.
//!
//! ## Example
//!
//! ```rust
//! use contender::Experiment;
//!
//! let experiment = Experiment::builder(|| Ok(21 * 2))
//!     .candidate("shifted", || Ok(84 >> 1))?
//!     .comparative()?
//!     .build()?;
//!
//! let result = experiment.run()?;
//! assert_eq!(*result.value(), 42);
//! assert_eq!(result.behavior_name(), "control");
//! assert_eq!(result.candidate_results().len(), 1);
//! # Ok::<(), contender::Error>(())
//! ```
//!
//! Runs are synchronous and side-effect-free with respect to the engine:
//! nothing is persisted, no background work is spawned, and the engine
//! holds no state across runs beyond its configuration and random source.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod behavior;
pub mod builder;
pub mod error;
pub mod experiment;
pub mod outcome;
pub mod strategy;

pub use behavior::{BehaviorFn, BehaviorRegistry, CONTROL_NAME};
pub use builder::ExperimentBuilder;
pub use error::{BehaviorError, Error, Result};
pub use experiment::{Experiment, ExperimentEvent, Observer};
pub use outcome::{CandidateOutcome, ExperimentResult, Outcome};
pub use strategy::{Selector, Strategy};
