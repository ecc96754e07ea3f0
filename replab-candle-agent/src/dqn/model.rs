use crate::{
    mlp::{Mlp, MlpConfig},
    opt::AdamConfig,
};
use anyhow::{bail, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Module, Optimizer as _, VarBuilder, VarMap};
use candle_optimisers::adam::Adam;
use log::info;
use std::path::Path;

/// Action-value network owning its variables.
///
/// Only networks built with [`QNetwork::build`] have an optimizer; target
/// networks from [`QNetwork::build_target`] are changed by copying
/// parameters into [`QNetwork::varmap`].
pub struct QNetwork {
    device: Device,
    varmap: VarMap,

    // Dimension of the output vector (equal to the number of actions).
    out_dim: usize,

    q: Mlp,
    opt: Option<Adam>,
}

impl QNetwork {
    fn build_without_opt(mlp_config: &MlpConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let q = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            Mlp::build(vb.pp("q"), mlp_config)?
        };

        Ok(Self {
            device,
            varmap,
            out_dim: mlp_config.out_dim,
            q,
            opt: None,
        })
    }

    /// Constructs a trainable [`QNetwork`] with freshly initialized parameters.
    pub fn build(
        mlp_config: &MlpConfig,
        opt_config: &AdamConfig,
        device: Device,
    ) -> Result<Self> {
        let mut qnet = Self::build_without_opt(mlp_config, device)?;
        qnet.opt = Some(opt_config.build(qnet.varmap.all_vars())?);
        Ok(qnet)
    }

    /// Constructs a network of the same architecture without optimizer.
    ///
    /// The parameters are freshly initialized, not copied.
    pub fn build_target(mlp_config: &MlpConfig, device: Device) -> Result<Self> {
        Self::build_without_opt(mlp_config, device)
    }

    /// Outputs the action values of a batch of observations.
    pub fn forward(&self, obs: &Tensor) -> Result<Tensor> {
        let obs = obs.to_device(&self.device)?;
        Ok(self.q.forward(&obs)?)
    }

    /// Computes the gradients of `loss` and updates the parameters.
    ///
    /// Fails on networks without optimizer.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        match self.opt.as_mut() {
            Some(opt) => Ok(opt.backward_step(loss)?),
            None => bail!("Q-network without optimizer can not be trained"),
        }
    }

    /// Returns `true` if the network has an optimizer.
    pub fn is_trainable(&self) -> bool {
        self.opt.is_some()
    }

    /// Returns the number of actions.
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// Returns the variables of the network.
    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }

    /// Saves the parameters in safetensors format.
    pub fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.varmap.save(&path)?;
        info!("Save Q-network to {:?}", path.as_ref());
        Ok(())
    }

    /// Loads the parameters saved with [`QNetwork::save`].
    pub fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.varmap.load(&path)?;
        info!("Load Q-network from {:?}", path.as_ref());
        Ok(())
    }
}
