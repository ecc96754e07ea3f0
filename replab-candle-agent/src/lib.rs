//! DQN agent implemented with [candle](https://crates.io/crates/candle-core).
//!
//! The agent implements [`replab_core::Agent`] and is trained with
//! [`replab_core::OffPolicyTrainer`] on batches sampled from a
//! [`replab_core::replay_buffer::ReplayBuffer`].
pub mod dqn;
pub mod mlp;
pub mod opt;
pub mod util;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The GPU device with the given ordinal.
    Cuda(usize),
}

impl Default for Device {
    fn default() -> Self {
        Self::Cpu
    }
}

impl TryFrom<Device> for candle_core::Device {
    type Error = candle_core::Error;

    fn try_from(device: Device) -> Result<Self, Self::Error> {
        match device {
            Device::Cpu => Ok(candle_core::Device::Cpu),
            Device::Cuda(n) => candle_core::Device::new_cuda(n),
        }
    }
}
