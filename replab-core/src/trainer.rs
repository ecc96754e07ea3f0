//! Training loops.
//!
//! [`OffPolicyTrainer`] feeds agents with batches sampled from a replay
//! buffer while the agent interacts with the environment.
//! [`OnPolicyTrainer`] collects whole episodes and hands each one to the
//! agent after it ends.
mod config;
mod off_policy;
mod on_policy;
use crate::record::{Record, RecordValue::Scalar};
pub use config::TrainerConfig;
pub use off_policy::OffPolicyTrainer;
pub use on_policy::OnPolicyTrainer;

/// Number of episodes between two progress reports.
fn report_period(n_episodes: usize, log_interval: usize) -> usize {
    (n_episodes / log_interval).max(1)
}

/// Record summarizing a finished episode.
fn episode_record(episode: usize, episode_return: f32, episode_steps: usize) -> Record {
    Record::from_slice(&[
        ("episode", Scalar(episode as f32)),
        ("episode_return", Scalar(episode_return)),
        ("episode_steps", Scalar(episode_steps as f32)),
    ])
}

fn mean(xs: &[f32]) -> f32 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f32>() / xs.len() as f32
    }
}
