//! Configuration of the trainers.
use crate::error::ReplabError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`OffPolicyTrainer`](super::OffPolicyTrainer) and
/// [`OnPolicyTrainer`](super::OnPolicyTrainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of training episodes.
    pub n_episodes: usize,

    /// Optimization starts once the replay buffer holds more transitions than this.
    ///
    /// Used only by the off-policy trainer.
    pub minimal_size: usize,

    /// The number of transitions sampled for each optimization step.
    ///
    /// Used only by the off-policy trainer.
    pub batch_size: usize,

    /// The number of progress reports over the whole training run.
    pub log_interval: usize,

    /// Episodes reaching this number of steps are cut off.
    pub max_episode_steps: Option<usize>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_episodes: 500,
            minimal_size: 500,
            batch_size: 64,
            log_interval: 10,
            max_episode_steps: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of training episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the size of the replay buffer at which optimization starts.
    pub fn minimal_size(mut self, v: usize) -> Self {
        self.minimal_size = v;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the number of progress reports.
    pub fn log_interval(mut self, v: usize) -> Self {
        self.log_interval = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Checks the values of the configuration.
    ///
    /// Sampling is done when the buffer holds more than `minimal_size`
    /// transitions, so `minimal_size + 1 >= batch_size` guarantees that a
    /// sample never asks for more transitions than stored.
    pub fn validate(&self) -> Result<(), ReplabError> {
        if self.batch_size == 0 {
            return Err(ReplabError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.minimal_size + 1 < self.batch_size {
            return Err(ReplabError::InvalidConfig(format!(
                "minimal_size ({}) must be at least batch_size - 1 ({})",
                self.minimal_size,
                self.batch_size - 1
            )));
        }
        if self.log_interval == 0 {
            return Err(ReplabError::InvalidConfig(
                "log_interval must be positive".to_string(),
            ));
        }
        if self.max_episode_steps == Some(0) {
            return Err(ReplabError::InvalidConfig(
                "max_episode_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
