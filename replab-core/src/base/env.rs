//! Environment.
use super::Step;
use anyhow::Result;
use std::fmt::Debug;

/// Represents an environment, typically an MDP.
///
/// Environments are turn based: the caller resets the environment to get
/// the first observation, then applies actions one at a time until
/// [`Step::is_done`] is `true`.
pub trait Env {
    /// Observation of the environment.
    type Obs: Clone + Debug;

    /// Action of the environment.
    type Act: Clone + Debug;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;
}
