//! Tabular agents for environments with discrete observations and actions.
//!
//! Both agents store action values in a [`QTable`] and explore with an
//! [`EpsilonGreedy`] rule.
//!
//! * [`NStepSarsa`] delays each update until `n` further rewards are known
//!   and bootstraps from the value of the action actually taken `n` steps
//!   later.
//! * [`QLearning`] does one-step off-policy updates and can also be trained
//!   from replay buffer batches through [`Agent::update`](crate::Agent::update).
//!
//! Environments are expected to number their states `0..n_states` and
//! actions `0..n_actions`.
mod config;
mod explorer;
mod n_step_sarsa;
mod q_learning;
mod q_table;
pub use config::{NStepSarsaConfig, QLearningConfig};
pub use explorer::EpsilonGreedy;
pub use n_step_sarsa::NStepSarsa;
pub use q_learning::QLearning;
pub use q_table::QTable;
