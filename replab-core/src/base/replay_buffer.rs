//! Replay buffer interface.
use anyhow::Result;

/// Interface of buffers that store experiences from environments.
pub trait ExperienceBufferBase {
    /// Items pushed into the buffer.
    type Item;

    /// Pushes an item into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the number of items in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interface of replay buffers that generate batches for training.
pub trait ReplayBufferBase {
    /// Configuration of the replay buffer.
    type Config: Clone;

    /// Batch generated from the buffer.
    type Batch;

    /// Builds a replay buffer.
    fn build(config: &Self::Config) -> Self;

    /// Constructs a batch of `size` items.
    fn batch(&mut self, size: usize) -> Result<Self::Batch>;
}
