//! Utilities for interaction of agents and environments.
use crate::{Env, Policy};
use anyhow::Result;
use log::info;

/// Runs episodes with a policy and returns the mean of the episode returns.
///
/// Episodes reaching `max_episode_steps` steps are cut off.
pub fn eval<E, P>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    max_episode_steps: Option<usize>,
) -> Result<f32>
where
    E: Env,
    P: Policy<E>,
{
    let mut r_sum = 0f32;

    for episode in 0..n_episodes {
        let mut obs = env.reset()?;
        let mut r_total = 0f32;
        let mut steps: usize = 0;

        loop {
            let act = policy.sample(&obs);
            let step = env.step(&act)?;
            r_total += step.reward;
            steps += 1;
            obs = step.obs;

            if step.is_done || max_episode_steps.map_or(false, |max| steps >= max) {
                break;
            }
        }

        info!("Episode {:?}, {:?} steps, reward = {:?}", episode, steps, r_total);
        r_sum += r_total;
    }

    Ok(if n_episodes == 0 {
        0.0
    } else {
        r_sum / n_episodes as f32
    })
}
