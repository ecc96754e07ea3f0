use super::{EpsilonGreedy, QLearningConfig, QTable};
use crate::{
    error::ReplabError,
    record::{Record, RecordValue},
    replay_buffer::TransitionBatch,
    Agent, Env, Policy,
};
use anyhow::Result;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use std::{fs, path::Path};

/// Tabular Q-learning.
///
/// Each transition moves `Q(s, a)` towards `r + gamma * max_a' Q(s', a')`,
/// without the bootstrap term on terminal transitions.
pub struct QLearning {
    q: QTable,
    gamma: f32,
    alpha: f32,
    explorer: EpsilonGreedy,
    train: bool,
    rng: StdRng,
}

impl QLearning {
    /// Constructs the agent in training mode.
    pub fn build(config: QLearningConfig) -> Result<Self, ReplabError> {
        if config.n_states == 0 {
            return Err(ReplabError::InvalidConfig(
                "n_states must be positive".to_string(),
            ));
        }
        if config.n_actions == 0 {
            return Err(ReplabError::InvalidConfig(
                "n_actions must be positive".to_string(),
            ));
        }

        Ok(Self {
            q: QTable::new(config.n_states, config.n_actions),
            gamma: config.gamma,
            alpha: config.alpha,
            explorer: config.explorer,
            train: true,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Returns the table of action values.
    pub fn q_table(&self) -> &QTable {
        &self.q
    }

    fn select(&mut self, s: usize) -> usize {
        if self.train {
            self.explorer.action(self.q.row(s), &mut self.rng)
        } else {
            self.q.argmax(s)
        }
    }

    /// Applies a one-step update and returns the TD error.
    fn update_one(&mut self, s: usize, a: usize, r: f32, s_next: usize, is_done: bool) -> f32 {
        let bootstrap = if is_done { 0.0 } else { self.q.max(s_next) };
        let td_error = r + self.gamma * bootstrap - self.q.get(s, a);
        self.q.add(s, a, self.alpha * td_error);
        td_error
    }

    /// Runs an episode, updating the table at every step.
    ///
    /// Returns the sum of rewards.
    pub fn run_episode<E>(&mut self, env: &mut E, max_steps: Option<usize>) -> Result<f32>
    where
        E: Env<Obs = usize, Act = usize>,
    {
        let mut s = env.reset()?;
        let mut reward_sum = 0f32;
        let mut steps: usize = 0;

        loop {
            let a = self.select(s);
            let step = env.step(&a)?;
            steps += 1;
            reward_sum += step.reward;
            self.update_one(s, a, step.reward, step.obs, step.is_done);

            if step.is_done || max_steps.map_or(false, |max| steps >= max) {
                break;
            }
            s = step.obs;
        }

        debug!("Episode finished in {} steps, reward_sum = {}", steps, reward_sum);
        Ok(reward_sum)
    }
}

impl<E> Policy<E> for QLearning
where
    E: Env<Obs = usize, Act = usize>,
{
    fn sample(&mut self, obs: &usize) -> usize {
        self.select(*obs)
    }
}

impl<E> Agent<E> for QLearning
where
    E: Env<Obs = usize, Act = usize>,
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

    /// Applies a one-step update for every transition of the batch, in order.
    fn update(&mut self, batch: &TransitionBatch<usize, usize>) -> Result<Record> {
        let mut abs_sum = 0f32;
        for i in 0..batch.len() {
            let td_error = self.update_one(
                batch.obs[i],
                batch.act[i],
                batch.reward[i],
                batch.next_obs[i],
                batch.is_done[i] != 0,
            );
            abs_sum += td_error.abs();
        }

        let mean_abs = abs_sum / batch.len().max(1) as f32;
        Ok(Record::from_slice(&[(
            "td_error",
            RecordValue::Scalar(mean_abs),
        )]))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.q.save(path.join("q_table.yaml"))
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.q.reload(path.join("q_table.yaml"))
    }
}
