//! Agent.
use super::{Env, Policy};
use crate::{record::Record, replay_buffer::TransitionBatch};
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step with a batch of transitions.
    ///
    /// Off-policy agents receive batches sampled from a replay buffer.
    /// On-policy agents receive a whole episode in temporal order.
    fn update(&mut self, batch: &TransitionBatch<E::Obs, E::Act>) -> Result<Record>;

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
