//! Behavior registry - one control behavior plus uniquely named candidates
//!
//! A behavior is a zero-argument fallible computation. The registry owns its
//! behaviors for the lifetime of one experiment configuration and is
//! read-only once an experiment is built; a run never mutates it.

use std::fmt;

use crate::error::{BehaviorError, Error, Result};

/// Reserved name for the control behavior.
pub const CONTROL_NAME: &str = "control";

/// A zero-argument fallible computation producing a value of type `T`.
pub type BehaviorFn<T> = dyn Fn() -> std::result::Result<T, BehaviorError> + Send + Sync;

/// Registry holding one control behavior and named candidate behaviors.
///
/// Candidate names are unique and kept in registration order. Registering a
/// duplicate name fails loudly rather than silently replacing the earlier
/// behavior: silent overwrite hides configuration mistakes in a system whose
/// whole purpose is validating correctness.
pub struct BehaviorRegistry<T> {
    control: Box<BehaviorFn<T>>,
    candidates: Vec<(String, Box<BehaviorFn<T>>)>,
}

impl<T> BehaviorRegistry<T> {
    /// Create a registry with the required control behavior.
    pub fn new(
        control: impl Fn() -> std::result::Result<T, BehaviorError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            control: Box::new(control),
            candidates: Vec::new(),
        }
    }

    /// Register a named candidate behavior.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedName`] if `name` is the reserved control
    /// name, and [`Error::DuplicateCandidate`] if a candidate with the same
    /// name is already registered.
    pub fn register_candidate(
        &mut self,
        name: impl Into<String>,
        behavior: impl Fn() -> std::result::Result<T, BehaviorError> + Send + Sync + 'static,
    ) -> Result<()> {
        let name = name.into();
        if name == CONTROL_NAME {
            return Err(Error::ReservedName);
        }
        if self.candidates.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::DuplicateCandidate(name));
        }
        self.candidates.push((name, Box::new(behavior)));
        Ok(())
    }

    /// Get the control behavior.
    #[must_use]
    pub fn control(&self) -> &BehaviorFn<T> {
        &*self.control
    }

    /// Look up a candidate behavior by name.
    #[must_use]
    pub fn candidate(&self, name: &str) -> Option<&BehaviorFn<T>> {
        self.candidates
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, behavior)| &**behavior)
    }

    /// Names of all registered candidates, in registration order.
    #[must_use]
    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Number of registered candidates.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the registry holds no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate entries in registration order.
    pub(crate) fn entries(&self) -> &[(String, Box<BehaviorFn<T>>)] {
        &self.candidates
    }
}

impl<T> fmt::Debug for BehaviorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("candidates", &self.candidate_names())
            .finish_non_exhaustive()
    }
}
