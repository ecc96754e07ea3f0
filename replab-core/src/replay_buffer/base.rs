//! Fixed-capacity replay buffer.
use super::{ReplayBufferConfig, Transition, TransitionBatch};
use crate::{error::ReplabError, ExperienceBufferBase, ReplayBufferBase};
use anyhow::Result;
use log::trace;
use rand::{rngs::StdRng, seq::index, SeedableRng};
use std::collections::{vec_deque::Iter, VecDeque};

/// A replay buffer with FIFO eviction and uniform sampling.
///
/// Transitions are kept in arrival order. The buffer never holds more than
/// `capacity` transitions: adding to a full buffer drops the oldest one.
pub struct ReplayBuffer<O, A> {
    /// Maximum number of transitions.
    capacity: usize,

    /// Stored transitions, oldest first.
    transitions: VecDeque<Transition<O, A>>,

    /// Random number generator for sampling.
    rng: StdRng,
}

impl<O, A> ReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    /// Builds a replay buffer after checking the configuration.
    pub fn try_build(config: &ReplayBufferConfig) -> Result<Self, ReplabError> {
        config.validate()?;
        Ok(Self::new(config.capacity, config.seed))
    }

    fn new(capacity: usize, seed: u64) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Adds a transition, evicting the oldest one if the capacity is exceeded.
    pub fn add(&mut self, tr: Transition<O, A>) {
        self.transitions.push_back(tr);
        if self.transitions.len() > self.capacity {
            self.transitions.pop_front();
        }
    }

    /// Samples `batch_size` distinct transitions uniformly at random.
    ///
    /// Sampled transitions stay in the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ReplabError::InsufficientData`] if `batch_size` is larger than
    /// the number of stored transitions. The buffer is not modified.
    pub fn sample(&mut self, batch_size: usize) -> Result<TransitionBatch<O, A>, ReplabError> {
        let available = self.transitions.len();
        if batch_size > available {
            return Err(ReplabError::InsufficientData {
                requested: batch_size,
                available,
            });
        }

        let ixs = index::sample(&mut self.rng, available, batch_size);
        trace!("Sampled indices {:?}", ixs);

        Ok(ixs
            .iter()
            .map(|ix| self.transitions[ix].clone())
            .collect())
    }

    /// Returns the number of stored transitions.
    pub fn size(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the number of stored transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Returns the maximum number of transitions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the stored transitions, oldest first.
    pub fn iter(&self) -> Iter<'_, Transition<O, A>> {
        self.transitions.iter()
    }

    /// Removes all transitions.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl<O, A> ExperienceBufferBase for ReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    type Item = Transition<O, A>;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        self.add(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.transitions.len()
    }
}

impl<O, A> ReplayBufferBase for ReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    type Config = ReplayBufferConfig;
    type Batch = TransitionBatch<O, A>;

    /// Builds the buffer without validation.
    ///
    /// A zero capacity gives a buffer that never holds a transition.
    fn build(config: &Self::Config) -> Self {
        Self::new(config.capacity, config.seed)
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        Ok(self.sample(size)?)
    }
}
