use super::{episode_record, mean, report_period, TrainerConfig};
use crate::{
    error::ReplabError,
    record::{Recorder, RecordValue::Scalar},
    replay_buffer::{Transition, TransitionBatch},
    Agent, Env, ExperienceBufferBase, ReplayBufferBase,
};
use anyhow::Result;
use log::{debug, info};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Training loop for off-policy agents.
///
/// For each episode the environment is reset and stepped until the episode
/// ends. Every environment step pushes a transition into the replay buffer.
/// Once the buffer holds more than `minimal_size` transitions, every
/// environment step is followed by an optimization step on a batch of
/// `batch_size` transitions sampled from the buffer.
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|Transition|C[ReplayBuffer]
///     C -->|TransitionBatch|A
/// ```
pub struct OffPolicyTrainer {
    n_episodes: usize,
    minimal_size: usize,
    batch_size: usize,
    log_interval: usize,
    max_episode_steps: Option<usize>,
}

impl OffPolicyTrainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Result<Self, ReplabError> {
        config.validate()?;
        Ok(Self {
            n_episodes: config.n_episodes,
            minimal_size: config.minimal_size,
            batch_size: config.batch_size,
            log_interval: config.log_interval,
            max_episode_steps: config.max_episode_steps,
        })
    }

    /// Trains the agent and returns the return of each episode.
    ///
    /// Records of optimization steps and finished episodes are written to
    /// `recorder`.
    pub fn train<E, A, R, D>(
        &mut self,
        env: &mut E,
        agent: &mut A,
        buffer: &mut R,
        recorder: &mut D,
    ) -> Result<Vec<f32>>
    where
        E: Env,
        A: Agent<E>,
        R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
            + ReplayBufferBase<Batch = TransitionBatch<E::Obs, E::Act>>,
        D: Recorder,
    {
        let period = report_period(self.n_episodes, self.log_interval);
        let mut returns = Vec::with_capacity(self.n_episodes);
        let mut opt_steps: usize = 0;
        agent.train();

        for episode in 0..self.n_episodes {
            let mut obs = env.reset()?;
            let mut episode_return = 0f32;
            let mut episode_steps: usize = 0;

            loop {
                let act = agent.sample(&obs);
                let step = env.step(&act)?;
                episode_steps += 1;
                episode_return += step.reward;

                let next_obs = step.obs.clone();
                buffer.push(Transition::new(obs, act, step.reward, step.obs, step.is_done))?;
                obs = next_obs;

                // Optimization starts once the buffer is warmed up
                if buffer.len() > self.minimal_size {
                    let batch = buffer.batch(self.batch_size)?;
                    let mut record = agent.update(&batch)?;
                    opt_steps += 1;
                    record.insert("opt_steps", Scalar(opt_steps as f32));
                    recorder.write(record);
                }

                let is_truncated = self
                    .max_episode_steps
                    .map_or(false, |max| episode_steps >= max);
                if step.is_done || is_truncated {
                    break;
                }
            }

            debug!(
                "Episode {} finished in {} steps, buffer size = {}",
                episode,
                episode_steps,
                buffer.len()
            );
            returns.push(episode_return);
            recorder.write(episode_record(episode, episode_return, episode_steps));

            if episode % period == 0 {
                info!(
                    "{}/{}, episode_return = {}",
                    episode, self.n_episodes, episode_return
                );
            }
        }

        info!("Mean of episode returns = {}", mean(&returns));
        Ok(returns)
    }
}
