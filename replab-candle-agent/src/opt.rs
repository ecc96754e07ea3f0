//! Optimizer of Q-networks.
use anyhow::Result;
use candle_core::Var;
use candle_nn::Optimizer as _;
use candle_optimisers::adam::{Adam, ParamsAdam};
use serde::{Deserialize, Serialize};

/// Configuration of the Adam optimizer used to train a Q-network.
///
/// Parameters other than the learning rate keep the defaults of
/// [`ParamsAdam`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AdamConfig {
    /// Learning rate.
    pub lr: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self { lr: 2e-3 }
    }
}

impl AdamConfig {
    /// Sets the learning rate.
    pub fn lr(mut self, v: f64) -> Self {
        self.lr = v;
        self
    }

    /// Constructs an optimizer updating `vars`.
    pub fn build(&self, vars: Vec<Var>) -> Result<Adam> {
        let params = ParamsAdam {
            lr: self.lr,
            ..ParamsAdam::default()
        };
        Ok(Adam::new(vars, params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adam_config_yaml() -> Result<()> {
        let config: AdamConfig = serde_yaml::from_str("lr: 0.01\n")?;
        assert_eq!(config, AdamConfig::default().lr(0.01));
        assert_eq!(AdamConfig::default().lr, 2e-3);
        Ok(())
    }
}
