//! Buffer of a single episode for on-policy training.
use super::{Transition, TransitionBatch};
use crate::ExperienceBufferBase;
use anyhow::Result;

/// Collects the transitions of one episode in temporal order.
///
/// The whole episode is handed to the agent with [`EpisodeBuffer::take`],
/// which leaves the buffer empty for the next episode.
pub struct EpisodeBuffer<O, A> {
    batch: TransitionBatch<O, A>,
}

impl<O, A> Default for EpisodeBuffer<O, A> {
    fn default() -> Self {
        Self {
            batch: TransitionBatch::default(),
        }
    }
}

impl<O, A> EpisodeBuffer<O, A> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sum of rewards collected so far.
    pub fn episode_return(&self) -> f32 {
        self.batch.reward.iter().sum()
    }

    /// Returns the collected transitions and empties the buffer.
    pub fn take(&mut self) -> TransitionBatch<O, A> {
        std::mem::take(&mut self.batch)
    }
}

impl<O, A> ExperienceBufferBase for EpisodeBuffer<O, A> {
    type Item = Transition<O, A>;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        self.batch.push(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.batch.len()
    }
}
