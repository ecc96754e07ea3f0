//! Replay buffer shared between threads.
use super::{ReplayBuffer, Transition, TransitionBatch};
use crate::error::ReplabError;
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable handle to a [`ReplayBuffer`] guarded by a mutex.
///
/// Each operation holds the lock for its whole duration, so eviction in
/// [`add`](SharedReplayBuffer::add) never interleaves with
/// [`sample`](SharedReplayBuffer::sample).
pub struct SharedReplayBuffer<O, A> {
    inner: Arc<Mutex<ReplayBuffer<O, A>>>,
}

impl<O, A> Clone for SharedReplayBuffer<O, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O, A> SharedReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    /// Wraps a replay buffer.
    pub fn new(buffer: ReplayBuffer<O, A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ReplayBuffer<O, A>>, ReplabError> {
        self.inner.lock().map_err(|_| ReplabError::Poisoned)
    }

    /// See [`ReplayBuffer::add`].
    pub fn add(&self, tr: Transition<O, A>) -> Result<(), ReplabError> {
        self.lock()?.add(tr);
        Ok(())
    }

    /// See [`ReplayBuffer::sample`].
    pub fn sample(&self, batch_size: usize) -> Result<TransitionBatch<O, A>, ReplabError> {
        self.lock()?.sample(batch_size)
    }

    /// See [`ReplayBuffer::size`].
    pub fn size(&self) -> Result<usize, ReplabError> {
        Ok(self.lock()?.size())
    }

    /// See [`ReplayBuffer::capacity`].
    pub fn capacity(&self) -> Result<usize, ReplabError> {
        Ok(self.lock()?.capacity())
    }
}
