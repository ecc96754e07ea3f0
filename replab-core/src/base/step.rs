//! Environment step.
use super::Env;
use crate::record::Record;

/// Result of an environment step, `(o_t+1, r_t, is_done_t)`.
///
/// The action and the previous observation are kept by the caller, which
/// pairs them with this object to make a
/// [`Transition`](crate::replay_buffer::Transition).
pub struct Step<E: Env> {
    /// Observation after the action.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is terminated.
    pub is_done: bool,

    /// Information defined by the environment.
    pub record: Record,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object without additional information.
    pub fn new(obs: E::Obs, reward: f32, is_done: bool) -> Self {
        Step {
            obs,
            reward,
            is_done,
            record: Record::empty(),
        }
    }

    /// Attaches environment specific values to the step.
    pub fn with_record(mut self, record: Record) -> Self {
        self.record = record;
        self
    }
}
