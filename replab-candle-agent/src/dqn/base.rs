//! DQN agent implemented with candle.
use super::{explorer::greedy, DqnConfig, EpsilonGreedy, QNetwork};
use crate::util::track;
use anyhow::{bail, Result};
use candle_core::{shape::D, Device, Tensor};
use candle_nn::loss::mse;
use log::debug;
use rand::{rngs::SmallRng, SeedableRng};
use replab_core::{
    error::ReplabError,
    record::{Record, RecordValue},
    replay_buffer::TransitionBatch,
    Agent, Env, Policy,
};
use std::{convert::TryInto, fs, marker::PhantomData, path::Path};

/// DQN agent implemented with candle.
///
/// Observations are flat slices of `f32` and actions are indices of the
/// output units of the Q-network.
pub struct Dqn<E> {
    qnet: QNetwork,
    qnet_tgt: QNetwork,
    discount_factor: f64,
    target_update_interval: usize,
    n_opts: usize,
    explorer: EpsilonGreedy,
    train: bool,
    in_dim: usize,
    device: Device,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> Dqn<E>
where
    E: Env<Act = usize>,
    E::Obs: AsRef<[f32]>,
{
    /// Constructs DQN agent in training mode.
    ///
    /// The target network starts as a copy of the online network.
    pub fn build(config: DqnConfig) -> Result<Self> {
        if config.target_update_interval == 0 {
            return Err(ReplabError::InvalidConfig(
                "target_update_interval must be positive".to_string(),
            )
            .into());
        }

        let device: Device = config.device.try_into()?;
        let qnet = QNetwork::build(&config.mlp_config, &config.opt_config, device.clone())?;
        let qnet_tgt = QNetwork::build_target(&config.mlp_config, device.clone())?;
        track(qnet_tgt.varmap(), qnet.varmap(), 1.0)?;

        Ok(Self {
            qnet,
            qnet_tgt,
            discount_factor: config.discount_factor,
            target_update_interval: config.target_update_interval,
            n_opts: 0,
            explorer: config.explorer,
            train: true,
            in_dim: config.mlp_config.in_dim,
            device,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }

    /// Returns the online network.
    pub fn qnet(&self) -> &QNetwork {
        &self.qnet
    }

    /// Returns the target network.
    pub fn qnet_tgt(&self) -> &QNetwork {
        &self.qnet_tgt
    }

    /// Returns the number of optimization steps done so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }

    /// Stacks observations into a tensor of shape `[n, in_dim]`.
    fn obs_tensor(&self, obs: &[E::Obs]) -> Result<Tensor> {
        let mut data = Vec::with_capacity(obs.len() * self.in_dim);
        for o in obs.iter() {
            let o = o.as_ref();
            if o.len() != self.in_dim {
                bail!(
                    "Observation of dimension {} is given to a Q-network with input dimension {}",
                    o.len(),
                    self.in_dim
                );
            }
            data.extend_from_slice(o);
        }
        Ok(Tensor::from_vec(data, (obs.len(), self.in_dim), &self.device)?)
    }

    fn action(&mut self, obs: &E::Obs) -> Result<usize> {
        let q = self.qnet.forward(&self.obs_tensor(std::slice::from_ref(obs))?)?;
        if self.train {
            self.explorer.action(&q, &mut self.rng)
        } else {
            greedy(&q)
        }
    }

    fn update_critic(&mut self, batch: &TransitionBatch<E::Obs, usize>) -> Result<f32> {
        let n = batch.len();
        let obs = self.obs_tensor(&batch.obs)?;
        let next_obs = self.obs_tensor(&batch.next_obs)?;
        let act = {
            let act = batch.act.iter().map(|&a| a as u32).collect::<Vec<_>>();
            Tensor::from_vec(act, (n, 1), &self.device)?
        };
        let reward = Tensor::from_slice(&batch.reward[..], (n,), &self.device)?;
        let is_not_done = {
            let is_not_done = batch
                .is_done
                .iter()
                .map(|&v| (1 - v) as f32)
                .collect::<Vec<_>>();
            Tensor::from_vec(is_not_done, (n,), &self.device)?
        };

        let pred = self
            .qnet
            .forward(&obs)?
            .gather(&act, D::Minus1)?
            .squeeze(D::Minus1)?;

        let tgt = {
            let q = self.qnet_tgt.forward(&next_obs)?.max(D::Minus1)?;
            let q = (is_not_done * q)?.affine(self.discount_factor, 0.0)?;
            (reward + q)?
        }
        .detach();

        let loss = mse(&pred, &tgt)?;
        self.qnet.backward_step(&loss)?;

        Ok(loss.to_scalar::<f32>()?)
    }

    fn sync_target(&mut self) -> Result<()> {
        track(self.qnet_tgt.varmap(), self.qnet.varmap(), 1.0)?;
        debug!("Target network synced after {} optimization steps", self.n_opts);
        Ok(())
    }
}

impl<E> Policy<E> for Dqn<E>
where
    E: Env<Act = usize>,
    E::Obs: AsRef<[f32]>,
{
    /// Epsilon-greedy in training mode, greedy in evaluation mode.
    ///
    /// # Panics
    ///
    /// Panics if the dimension of the observation differs from the input
    /// dimension of the Q-network.
    fn sample(&mut self, obs: &E::Obs) -> usize {
        match self.action(obs) {
            Ok(a) => a,
            Err(e) => panic!("Failed to compute the action values: {}", e),
        }
    }
}

impl<E> Agent<E> for Dqn<E>
where
    E: Env<Act = usize>,
    E::Obs: AsRef<[f32]>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn update(&mut self, batch: &TransitionBatch<E::Obs, usize>) -> Result<Record> {
        let loss = self.update_critic(batch)?;

        self.n_opts += 1;
        if self.n_opts % self.target_update_interval == 0 {
            self.sync_target()?;
        }

        Ok(Record::from_slice(&[("loss", RecordValue::Scalar(loss))]))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.qnet.save(path.join("qnet.safetensors"))?;
        self.qnet_tgt.save(path.join("qnet_tgt.safetensors"))?;
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.qnet.load(path.join("qnet.safetensors"))?;
        self.qnet_tgt.load(path.join("qnet_tgt.safetensors"))?;
        Ok(())
    }
}
