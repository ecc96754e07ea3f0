//! Transitions and batches of transitions.
use std::iter::FromIterator;

/// A transition `(o_t, a_t, r_t, o_t+1, is_done_t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<O, A> {
    /// Observation before the action.
    pub obs: O,

    /// Action taken.
    pub act: A,

    /// Reward received.
    pub reward: f32,

    /// Observation after the action.
    pub next_obs: O,

    /// `true` if the episode terminated at this step.
    pub is_done: bool,
}

impl<O, A> Transition<O, A> {
    /// Constructs a transition.
    pub fn new(obs: O, act: A, reward: f32, next_obs: O, is_done: bool) -> Self {
        Self {
            obs,
            act,
            reward,
            next_obs,
            is_done,
        }
    }
}

/// Transitions regrouped by field.
///
/// All fields have the same length. `is_done` holds `0`/`1` flags so that
/// it can be used directly as a mask in numeric computations.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionBatch<O, A> {
    /// Observations.
    pub obs: Vec<O>,

    /// Actions.
    pub act: Vec<A>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Next observations.
    pub next_obs: Vec<O>,

    /// Termination flags.
    pub is_done: Vec<i8>,
}

impl<O, A> TransitionBatch<O, A> {
    /// Creates an empty batch.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            obs: Vec::with_capacity(capacity),
            act: Vec::with_capacity(capacity),
            reward: Vec::with_capacity(capacity),
            next_obs: Vec::with_capacity(capacity),
            is_done: Vec::with_capacity(capacity),
        }
    }

    /// Appends a transition.
    pub fn push(&mut self, tr: Transition<O, A>) {
        self.obs.push(tr.obs);
        self.act.push(tr.act);
        self.reward.push(tr.reward);
        self.next_obs.push(tr.next_obs);
        self.is_done.push(tr.is_done as i8);
    }

    /// Returns the number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch has no transitions.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Unpacks the batch into `(o_t, a_t, r_t, o_t+1, is_done_t)`.
    pub fn unpack(self) -> (Vec<O>, Vec<A>, Vec<f32>, Vec<O>, Vec<i8>) {
        (self.obs, self.act, self.reward, self.next_obs, self.is_done)
    }

    /// Splits the batch back into transitions.
    pub fn into_transitions(self) -> Vec<Transition<O, A>> {
        self.obs
            .into_iter()
            .zip(self.act)
            .zip(self.reward)
            .zip(self.next_obs)
            .zip(self.is_done)
            .map(|((((obs, act), reward), next_obs), is_done)| {
                Transition::new(obs, act, reward, next_obs, is_done != 0)
            })
            .collect()
    }
}

impl<O, A> Default for TransitionBatch<O, A> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<O, A> FromIterator<Transition<O, A>> for TransitionBatch<O, A> {
    fn from_iter<I: IntoIterator<Item = Transition<O, A>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        for tr in iter {
            batch.push(tr);
        }
        batch
    }
}
