//! Core interfaces: environments, policies, agents and buffers.
mod agent;
mod env;
mod policy;
mod replay_buffer;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use policy::Policy;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
pub use step::Step;
