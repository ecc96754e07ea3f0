#![warn(missing_docs)]
//! A library for reinforcement learning with experience replay.
//!
//! The central piece is [`replay_buffer::ReplayBuffer`], a bounded FIFO
//! store of transitions with uniform sampling. Around it the crate provides
//! the interfaces of environments and agents, off-policy and on-policy
//! training loops, tabular agents and generalized advantage estimation.
pub mod error;
pub mod record;
pub mod replay_buffer;
pub mod tabular;
pub mod util;

mod base;
pub use base::{Agent, Env, ExperienceBufferBase, Policy, ReplayBufferBase, Step};

mod advantage;
pub use advantage::compute_advantage;

mod trainer;
pub use trainer::{OffPolicyTrainer, OnPolicyTrainer, TrainerConfig};
