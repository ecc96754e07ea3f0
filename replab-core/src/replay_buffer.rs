//! Bounded experience buffer with uniform random sampling.
//!
//! [`ReplayBuffer`] stores the most recent transitions up to a fixed
//! capacity. Adding a transition to a full buffer evicts the oldest one.
//! Batches are drawn uniformly at random without replacement and are
//! regrouped by field in a [`TransitionBatch`], ready for batched numeric
//! computation.
//!
//! ```rust
//! use replab_core::replay_buffer::{ReplayBuffer, ReplayBufferConfig, Transition};
//!
//! let config = ReplayBufferConfig::default().capacity(3).seed(0);
//! let mut buffer = ReplayBuffer::<Vec<f32>, usize>::try_build(&config).unwrap();
//!
//! for i in 0..4 {
//!     let obs = vec![i as f32];
//!     let next_obs = vec![i as f32 + 1.0];
//!     buffer.add(Transition::new(obs, i, -1.0, next_obs, false));
//! }
//! assert_eq!(buffer.size(), 3);
//!
//! let batch = buffer.sample(3).unwrap();
//! assert_eq!(batch.len(), 3);
//! assert!(buffer.sample(4).is_err());
//! ```
//!
//! [`SharedReplayBuffer`] wraps the buffer for use from several threads and
//! [`EpisodeBuffer`] collects a single episode for on-policy updates.
mod base;
mod batch;
mod config;
mod episode;
mod shared;
pub use base::ReplayBuffer;
pub use batch::{Transition, TransitionBatch};
pub use config::ReplayBufferConfig;
pub use episode::EpisodeBuffer;
pub use shared::SharedReplayBuffer;
