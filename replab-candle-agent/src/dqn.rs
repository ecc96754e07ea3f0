//! DQN agent.
//!
//! The action-value function is an [`Mlp`](crate::mlp::Mlp). A second copy
//! of the network, the target network, provides the bootstrap values of
//! the regression targets and is overwritten with the online network after
//! every `target_update_interval` optimization steps.
mod base;
mod config;
mod explorer;
mod model;
pub use base::Dqn;
pub use config::DqnConfig;
pub use explorer::EpsilonGreedy;
pub use model::QNetwork;
