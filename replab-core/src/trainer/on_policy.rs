use super::{episode_record, mean, report_period, TrainerConfig};
use crate::{
    error::ReplabError,
    record::{Recorder, RecordValue::Scalar},
    replay_buffer::{EpisodeBuffer, Transition},
    Agent, Env, ExperienceBufferBase,
};
use anyhow::Result;
use log::info;

/// Training loop for on-policy agents.
///
/// Each episode is collected into an [`EpisodeBuffer`] and passed to
/// [`Agent::update`] in temporal order once it ends. No replay buffer is
/// involved, so `minimal_size` and `batch_size` of [`TrainerConfig`] are
/// ignored.
pub struct OnPolicyTrainer {
    n_episodes: usize,
    log_interval: usize,
    max_episode_steps: Option<usize>,
}

impl OnPolicyTrainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Result<Self, ReplabError> {
        config.validate()?;
        Ok(Self {
            n_episodes: config.n_episodes,
            log_interval: config.log_interval,
            max_episode_steps: config.max_episode_steps,
        })
    }

    /// Trains the agent and returns the return of each episode.
    pub fn train<E, A, D>(&mut self, env: &mut E, agent: &mut A, recorder: &mut D) -> Result<Vec<f32>>
    where
        E: Env,
        A: Agent<E>,
        D: Recorder,
    {
        let period = report_period(self.n_episodes, self.log_interval);
        let mut returns = Vec::with_capacity(self.n_episodes);
        let mut episode_buffer = EpisodeBuffer::new();
        agent.train();

        for episode in 0..self.n_episodes {
            let mut obs = env.reset()?;
            let mut episode_steps: usize = 0;

            loop {
                let act = agent.sample(&obs);
                let step = env.step(&act)?;
                episode_steps += 1;

                let next_obs = step.obs.clone();
                episode_buffer.push(Transition::new(obs, act, step.reward, step.obs, step.is_done))?;
                obs = next_obs;

                let is_truncated = self
                    .max_episode_steps
                    .map_or(false, |max| episode_steps >= max);
                if step.is_done || is_truncated {
                    break;
                }
            }

            let episode_return = episode_buffer.episode_return();
            let batch = episode_buffer.take();
            let mut record = agent.update(&batch)?;
            record.insert("opt_steps", Scalar((episode + 1) as f32));
            recorder.write(record.merge(episode_record(episode, episode_return, episode_steps)));
            returns.push(episode_return);

            if (episode + 1) % period == 0 {
                let recent = &returns[returns.len() - period..];
                info!(
                    "{}/{}, mean return of the last {} episodes = {:.3}",
                    episode + 1,
                    self.n_episodes,
                    period,
                    mean(recent)
                );
            }
        }

        Ok(returns)
    }
}
