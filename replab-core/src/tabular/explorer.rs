use super::q_table::argmax;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy action selection.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Probability of taking a uniformly random action.
    pub epsilon: f32,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self { epsilon: 0.1 }
    }
}

impl EpsilonGreedy {
    /// Constructs the explorer.
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Takes an action based on action values.
    pub fn action(&self, values: &[f32], rng: &mut impl Rng) -> usize {
        if rng.gen::<f32>() < self.epsilon {
            rng.gen_range(0..values.len())
        } else {
            argmax(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_greedy_when_epsilon_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        let explorer = EpsilonGreedy::new(0.0);
        for _ in 0..100 {
            assert_eq!(explorer.action(&[0.0, 3.0, 1.0], &mut rng), 1);
        }
    }

    #[test]
    fn test_random_when_epsilon_one() {
        let mut rng = StdRng::seed_from_u64(0);
        let explorer = EpsilonGreedy::new(1.0);
        let mut counts = [0; 3];
        for _ in 0..300 {
            counts[explorer.action(&[0.0, 3.0, 1.0], &mut rng)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 50));
    }
}
