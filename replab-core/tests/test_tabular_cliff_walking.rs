mod common;
use anyhow::Result;
use common::{init_logger, CliffWalking, N_COLS, N_ROWS};
use replab_core::{
    record::BufferedRecorder,
    replay_buffer::{ReplayBuffer, ReplayBufferConfig},
    tabular::{EpsilonGreedy, NStepSarsa, NStepSarsaConfig, QLearning, QLearningConfig},
    util, Agent, OffPolicyTrainer, OnPolicyTrainer, TrainerConfig,
};

const N_EPISODES: usize = 500;
const SARSA_EPISODES: usize = 1500;
const MAX_EPISODE_STEPS: usize = 1000;
const N_ACTIONS: usize = 4;
const SEEDS: [u64; 3] = [1, 7, 42];

// A greedy walk that falls into the cliff or wanders until the step limit
// returns -100 or less.
const SUCCESS_THRESHOLD: f32 = -40.0;

// Undiscounted: walking into a wall forever must be worth less than any path
// to the goal.
fn sarsa_config(seed: u64) -> NStepSarsaConfig {
    NStepSarsaConfig::default()
        .table(N_ROWS * N_COLS, N_ACTIONS)
        .n(5)
        .gamma(1.0)
        .alpha(0.05)
        .explorer(EpsilonGreedy::new(0.05))
        .seed(seed)
}

fn q_learning_config() -> QLearningConfig {
    QLearningConfig::default()
        .table(N_ROWS * N_COLS, N_ACTIONS)
        .gamma(0.9)
        .alpha(0.1)
        .explorer(EpsilonGreedy::new(0.1))
        .seed(42)
}

fn greedy_return<A: Agent<CliffWalking>>(agent: &mut A) -> Result<f32> {
    agent.eval();
    util::eval(&mut CliffWalking::new(), agent, 1, Some(100))
}

#[test]
fn test_n_step_sarsa_online() -> Result<()> {
    init_logger();
    for seed in SEEDS {
        let mut env = CliffWalking::with_random_start(seed);
        let mut agent = NStepSarsa::build(sarsa_config(seed))?;

        let returns = (0..SARSA_EPISODES)
            .map(|_| agent.run_episode(&mut env, Some(MAX_EPISODE_STEPS)))
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(returns.len(), SARSA_EPISODES);

        let greedy = greedy_return(&mut agent)?;
        assert!(greedy > SUCCESS_THRESHOLD, "seed {}: {}", seed, greedy);
    }
    Ok(())
}

#[test]
fn test_n_step_sarsa_with_on_policy_trainer() -> Result<()> {
    init_logger();
    for seed in SEEDS {
        let config = TrainerConfig::default()
            .n_episodes(SARSA_EPISODES)
            .max_episode_steps(Some(MAX_EPISODE_STEPS));
        let mut trainer = OnPolicyTrainer::build(config)?;
        let mut env = CliffWalking::with_random_start(seed);
        let mut agent = NStepSarsa::build(sarsa_config(seed))?;
        let mut recorder = BufferedRecorder::new();

        let returns = trainer.train(&mut env, &mut agent, &mut recorder)?;
        assert_eq!(returns.len(), SARSA_EPISODES);
        assert_eq!(recorder.scalars("td_error").len(), SARSA_EPISODES);

        let greedy = greedy_return(&mut agent)?;
        assert!(greedy > SUCCESS_THRESHOLD, "seed {}: {}", seed, greedy);
    }
    Ok(())
}

#[test]
fn test_q_learning_online() -> Result<()> {
    init_logger();
    let mut env = CliffWalking::new();
    let mut agent = QLearning::build(q_learning_config())?;

    for _ in 0..N_EPISODES {
        agent.run_episode(&mut env, Some(MAX_EPISODE_STEPS))?;
    }

    assert!(greedy_return(&mut agent)? > SUCCESS_THRESHOLD);
    assert_eq!(agent.q_table().n_states(), N_ROWS * N_COLS);
    Ok(())
}

#[test]
fn test_q_learning_from_replay_buffer() -> Result<()> {
    init_logger();
    let config = TrainerConfig::default()
        .n_episodes(300)
        .minimal_size(100)
        .batch_size(32)
        .max_episode_steps(Some(MAX_EPISODE_STEPS));
    let mut trainer = OffPolicyTrainer::build(config)?;
    let mut env = CliffWalking::new();
    let mut agent = QLearning::build(q_learning_config())?;
    let mut buffer =
        ReplayBuffer::<usize, usize>::try_build(&ReplayBufferConfig::default().capacity(10000).seed(42))?;
    let mut recorder = BufferedRecorder::new();

    let returns = trainer.train(&mut env, &mut agent, &mut buffer, &mut recorder)?;
    assert_eq!(returns.len(), 300);
    assert!(buffer.size() <= 10000);

    assert!(greedy_return(&mut agent)? > SUCCESS_THRESHOLD);
    Ok(())
}
