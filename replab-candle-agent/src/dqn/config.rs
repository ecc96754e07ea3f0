//! Configuration of DQN agent.
use super::EpsilonGreedy;
use crate::{mlp::MlpConfig, opt::AdamConfig, Device};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Dqn`](super::Dqn) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DqnConfig {
    /// Configuration of the Q-network.
    pub mlp_config: MlpConfig,

    /// Configuration of the optimizer of the online network.
    pub opt_config: AdamConfig,

    /// Discount factor.
    pub discount_factor: f64,

    /// Number of optimization steps between two syncs of the target network.
    pub target_update_interval: usize,

    /// Exploration in training mode.
    pub explorer: EpsilonGreedy,

    /// Random seed for exploration.
    pub seed: u64,

    /// Device on which the networks are placed.
    pub device: Device,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            mlp_config: MlpConfig::default(),
            opt_config: AdamConfig::default(),
            discount_factor: 0.98,
            target_update_interval: 10,
            explorer: EpsilonGreedy::default(),
            seed: 42,
            device: Device::Cpu,
        }
    }
}

impl DqnConfig {
    /// Sets the configuration of the Q-network.
    pub fn mlp_config(mut self, v: MlpConfig) -> Self {
        self.mlp_config = v;
        self
    }

    /// Sets the configuration of the optimizer.
    pub fn opt_config(mut self, v: AdamConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Sets the discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Sets the number of optimization steps between syncs of the target network.
    pub fn target_update_interval(mut self, v: usize) -> Self {
        self.target_update_interval = v;
        self
    }

    /// Sets the explorer.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Constructs [`DqnConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DqnConfig`] as a YAML file.
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
    fn test_serde_dqn_config() -> Result<()> {
        let config = DqnConfig::default()
            .mlp_config(MlpConfig::new(6, vec![64, 64], 3))
            .opt_config(AdamConfig::default().lr(1e-3))
            .target_update_interval(100)
            .explorer(EpsilonGreedy::new(0.05));

        let dir = TempDir::new("dqn_config")?;
        let path = dir.path().join("dqn_config.yaml");
        config.save(&path)?;
        let config_ = DqnConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
