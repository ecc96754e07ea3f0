use super::{EpsilonGreedy, NStepSarsaConfig, QTable};
use crate::{
    error::ReplabError,
    record::{Record, RecordValue},
    replay_buffer::TransitionBatch,
    Agent, Env, Policy,
};
use anyhow::Result;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use std::{collections::VecDeque, fs, path::Path};

/// Tabular N-step Sarsa.
///
/// [`NStepSarsa::run_episode`] updates the table while the episode runs:
/// the `n` most recent `(s, a, r)` entries are kept in a window, and when
/// the window is full its oldest entry is moved towards
///
/// `G = r_t + gamma r_t+1 + ... + gamma^(n-1) r_t+n-1 + gamma^n Q(s_t+n, a_t+n)`
///
/// before being dropped. When the episode ends the remaining entries are
/// updated with truncated returns.
///
/// [`Agent::update`] applies the same targets to a complete episode given in
/// temporal order, as produced by [`OnPolicyTrainer`](crate::OnPolicyTrainer).
pub struct NStepSarsa {
    q: QTable,
    n: usize,
    gamma: f32,
    alpha: f32,
    explorer: EpsilonGreedy,
    train: bool,
    rng: StdRng,
    window: VecDeque<(usize, usize, f32)>,
}

impl NStepSarsa {
    /// Constructs the agent in training mode.
    pub fn build(config: NStepSarsaConfig) -> Result<Self, ReplabError> {
        if config.n == 0 {
            return Err(ReplabError::InvalidConfig("n must be positive".to_string()));
        }
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
            n: config.n,
            gamma: config.gamma,
            alpha: config.alpha,
            explorer: config.explorer,
            train: true,
            rng: StdRng::seed_from_u64(config.seed),
            window: VecDeque::with_capacity(config.n),
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

    /// Targets of all entries in the window, oldest first.
    fn window_targets(&self, bootstrap: f32) -> Vec<f32> {
        let mut g = bootstrap;
        let mut targets = self
            .window
            .iter()
            .rev()
            .map(|&(_, _, r)| {
                g = r + self.gamma * g;
                g
            })
            .collect::<Vec<_>>();
        targets.reverse();
        targets
    }

    /// Moves `Q(s, a)` towards `target` and returns the TD error.
    fn update_towards(&mut self, s: usize, a: usize, target: f32) -> f32 {
        let td_error = target - self.q.get(s, a);
        self.q.add(s, a, self.alpha * td_error);
        td_error
    }

    fn update_oldest(&mut self, bootstrap: f32) {
        let target = self.window_targets(bootstrap)[0];
        if let Some((s, a, _)) = self.window.pop_front() {
            self.update_towards(s, a, target);
        }
    }

    // Updates are applied in order so that a pair occurring twice in the
    // window moves from its already updated value.
    fn flush(&mut self, bootstrap: f32) {
        let targets = self.window_targets(bootstrap);
        let entries = self.window.drain(..).collect::<Vec<_>>();
        for ((s, a, _), g) in entries.into_iter().zip(targets) {
            self.update_towards(s, a, g);
        }
    }

    /// Runs an episode, updating the table at every step.
    ///
    /// Returns the sum of rewards. Episodes reaching `max_steps` steps are
    /// cut off; their remaining entries bootstrap from the value of the next
    /// state-action pair.
    pub fn run_episode<E>(&mut self, env: &mut E, max_steps: Option<usize>) -> Result<f32>
    where
        E: Env<Obs = usize, Act = usize>,
    {
        self.window.clear();
        let mut s = env.reset()?;
        let mut a = self.select(s);
        let mut reward_sum = 0f32;
        let mut steps: usize = 0;

        loop {
            let step = env.step(&a)?;
            steps += 1;
            reward_sum += step.reward;
            let s_next = step.obs;
            let a_next = self.select(s_next);
            self.window.push_back((s, a, step.reward));

            if step.is_done {
                self.flush(0.0);
                break;
            }

            let bootstrap = self.q.get(s_next, a_next);
            if self.window.len() == self.n {
                self.update_oldest(bootstrap);
            }

            if max_steps.map_or(false, |max| steps >= max) {
                self.flush(bootstrap);
                break;
            }

            s = s_next;
            a = a_next;
        }

        debug!("Episode finished in {} steps, reward_sum = {}", steps, reward_sum);
        Ok(reward_sum)
    }

    /// N-step targets of a complete episode.
    fn episode_targets(&self, batch: &TransitionBatch<usize, usize>) -> Vec<f32> {
        let len = batch.len();
        let last_bootstrap = match batch.is_done.last() {
            Some(&1) | None => 0.0,
            Some(_) => self.q.max(batch.next_obs[len - 1]),
        };

        (0..len)
            .map(|t| {
                let end = (t + self.n).min(len);
                let mut g = if end < len {
                    self.q.get(batch.obs[end], batch.act[end])
                } else {
                    last_bootstrap
                };
                for k in (t..end).rev() {
                    g = batch.reward[k] + self.gamma * g;
                }
                g
            })
            .collect()
    }
}

impl<E> Policy<E> for NStepSarsa
where
    E: Env<Obs = usize, Act = usize>,
{
    fn sample(&mut self, obs: &usize) -> usize {
        self.select(*obs)
    }
}

impl<E> Agent<E> for NStepSarsa
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

    /// Updates the table with a complete episode in temporal order.
    ///
    /// Targets are computed before any update. The updates are then applied
    /// one after another, so a pair visited `k` times in the episode moves
    /// `k` times from its current value.
    fn update(&mut self, batch: &TransitionBatch<usize, usize>) -> Result<Record> {
        let targets = self.episode_targets(batch);
        let mut abs_sum = 0f32;
        for ((&s, &a), g) in batch.obs.iter().zip(&batch.act).zip(targets) {
            abs_sum += self.update_towards(s, a, g).abs();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Step;
    use tempdir::TempDir;

    struct Grid;

    impl Env for Grid {
        type Obs = usize;
        type Act = usize;

        fn reset(&mut self) -> Result<usize> {
            Ok(0)
        }

        fn step(&mut self, _a: &usize) -> Result<Step<Self>> {
            Ok(Step::new(0, -1.0, true))
        }
    }

    fn agent(n: usize) -> NStepSarsa {
        let config = NStepSarsaConfig::default()
            .table(4, 2)
            .n(n)
            .gamma(0.5)
            .alpha(1.0)
            .explorer(EpsilonGreedy::new(0.0));
        NStepSarsa::build(config).unwrap()
    }

    #[test]
    fn test_window_targets() {
        let mut sarsa = agent(3);
        sarsa.window.extend([(0, 0, 1.0), (1, 0, 2.0), (2, 0, 4.0)]);

        // g2 = 4 + 0.5 * 8 = 8, g1 = 2 + 0.5 * 8 = 6, g0 = 1 + 0.5 * 6 = 4
        assert_eq!(sarsa.window_targets(8.0), vec![4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_update_oldest_pops_one() {
        let mut sarsa = agent(2);
        sarsa.window.extend([(0, 1, 1.0), (1, 0, 2.0)]);
        sarsa.update_oldest(4.0);

        // alpha = 1 sets Q to the target: 1 + 0.5 * (2 + 0.5 * 4) = 3
        assert_eq!(sarsa.q.get(0, 1), 3.0);
        assert_eq!(sarsa.window.len(), 1);
    }

    #[test]
    fn test_episode_targets_terminal_and_bootstrap() {
        let mut sarsa = agent(2);
        sarsa.q.set(2, 1, 10.0);

        let batch = TransitionBatch {
            obs: vec![0, 1, 2, 3],
            act: vec![0, 0, 1, 0],
            reward: vec![1.0, 1.0, 1.0, 1.0],
            next_obs: vec![1, 2, 3, 3],
            is_done: vec![0, 0, 0, 1],
        };
        let targets = sarsa.episode_targets(&batch);

        // t = 0 bootstraps from Q(2, 1)
        assert_eq!(targets[0], 1.0 + 0.5 * (1.0 + 0.5 * 10.0));
        // t = 2 and t = 3 reach the terminal step
        assert_eq!(targets[2], 1.0 + 0.5 * 1.0);
        assert_eq!(targets[3], 1.0);
    }

    #[test]
    fn test_build_rejects_zero_n() {
        let config = NStepSarsaConfig::default().table(4, 2).n(0);
        assert!(NStepSarsa::build(config).is_err());
    }

    #[test]
    fn test_build_rejects_zero_states() {
        let config = NStepSarsaConfig::default().table(0, 2);
        assert_eq!(
            NStepSarsa::build(config).err(),
            Some(ReplabError::InvalidConfig(
                "n_states must be positive".to_string()
            ))
        );
    }

    #[test]
    fn test_update_repeated_pair_in_order() -> Result<()> {
        let mut sarsa = agent(1);
        let batch = TransitionBatch {
            obs: vec![0, 0],
            act: vec![0, 0],
            reward: vec![1.0, 2.0],
            next_obs: vec![0, 1],
            is_done: vec![0, 1],
        };

        // targets are 1 + 0.5 * Q(0, 0) = 1 and 2; with alpha = 1 the second
        // update overwrites the first instead of adding to it
        let record = Agent::<Grid>::update(&mut sarsa, &batch)?;
        assert_eq!(sarsa.q.get(0, 0), 2.0);
        assert_eq!(record.get_scalar("td_error")?, 1.0);
        Ok(())
    }

    #[test]
    fn test_flush_repeated_pair_in_order() {
        let mut sarsa = agent(3);
        sarsa.window.extend([(1, 1, 1.0), (1, 1, 2.0)]);
        sarsa.flush(0.0);

        // targets are 2 and 2, applied one after another
        assert_eq!(sarsa.q.get(1, 1), 2.0);
        assert!(sarsa.window.is_empty());
    }

    #[test]
    fn test_load_params_rejects_other_shape() -> Result<()> {
        let dir = TempDir::new("n_step_sarsa")?;
        let small = NStepSarsa::build(NStepSarsaConfig::default().table(3, 4))?;
        Agent::<Grid>::save_params(&small, dir.path())?;

        let mut large = NStepSarsa::build(NStepSarsaConfig::default().table(48, 4))?;
        let err = Agent::<Grid>::load_params(&mut large, dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReplabError>(),
            Some(ReplabError::InvalidConfig(_))
        ));
        assert_eq!(large.q_table(), &QTable::new(48, 4));
        Ok(())
    }
}
