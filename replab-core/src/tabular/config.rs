//! Configuration of the tabular agents.
use super::EpsilonGreedy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`NStepSarsa`](super::NStepSarsa).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct NStepSarsaConfig {
    /// The number of states.
    pub n_states: usize,

    /// The number of actions.
    pub n_actions: usize,

    /// The number of rewards accumulated before a value is updated.
    pub n: usize,

    /// Discount factor.
    pub gamma: f32,

    /// Step size of the updates.
    pub alpha: f32,

    /// Exploration in training mode.
    pub explorer: EpsilonGreedy,

    /// Random seed for exploration.
    pub seed: u64,
}

impl Default for NStepSarsaConfig {
    fn default() -> Self {
        Self {
            n_states: 0,
            n_actions: 0,
            n: 5,
            gamma: 0.9,
            alpha: 0.1,
            explorer: EpsilonGreedy::default(),
            seed: 42,
        }
    }
}

impl NStepSarsaConfig {
    /// Sets the sizes of the table.
    pub fn table(mut self, n_states: usize, n_actions: usize) -> Self {
        self.n_states = n_states;
        self.n_actions = n_actions;
        self
    }

    /// Sets the number of steps.
    pub fn n(mut self, v: usize) -> Self {
        self.n = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the step size.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the exploration rule.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
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

/// Configuration of [`QLearning`](super::QLearning).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QLearningConfig {
    /// The number of states.
    pub n_states: usize,

    /// The number of actions.
    pub n_actions: usize,

    /// Discount factor.
    pub gamma: f32,

    /// Step size of the updates.
    pub alpha: f32,

    /// Exploration in training mode.
    pub explorer: EpsilonGreedy,

    /// Random seed for exploration.
    pub seed: u64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            n_states: 0,
            n_actions: 0,
            gamma: 0.9,
            alpha: 0.1,
            explorer: EpsilonGreedy::default(),
            seed: 42,
        }
    }
}

impl QLearningConfig {
    /// Sets the sizes of the table.
    pub fn table(mut self, n_states: usize, n_actions: usize) -> Self {
        self.n_states = n_states;
        self.n_actions = n_actions;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the step size.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the exploration rule.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
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
