//! Configuration of [`ReplayBuffer`](super::ReplayBuffer).
use crate::error::ReplabError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayBuffer`](super::ReplayBuffer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayBufferConfig {
    /// Maximum number of transitions in the buffer.
    /// When the buffer is full, a new transition replaces the oldest one.
    pub capacity: usize,

    /// Random seed used for sampling transitions.
    pub seed: u64,
}

impl Default for ReplayBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 10000,
            seed: 42,
        }
    }
}

impl ReplayBufferConfig {
    /// Sets the capacity of the replay buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), ReplabError> {
        if self.capacity == 0 {
            return Err(ReplabError::InvalidConfig(
                "capacity of the replay buffer must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_replay_buffer_config() -> Result<()> {
        let config = ReplayBufferConfig::default().capacity(500).seed(7);

        let dir = TempDir::new("replay_buffer_config")?;
        let path = dir.path().join("replay_buffer_config.yaml");

        config.save(&path)?;
        let config_ = ReplayBufferConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = ReplayBufferConfig::default().capacity(0);
        assert!(matches!(
            config.validate(),
            Err(ReplabError::InvalidConfig(_))
        ));
        assert!(ReplayBufferConfig::default().validate().is_ok());
    }
}
