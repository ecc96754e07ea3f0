//! Exploration strategy of DQN.
use anyhow::Result;
use candle_core::{shape::D, Tensor};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer for DQN.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Probability of taking a uniformly random action.
    pub eps: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self { eps: 0.01 }
    }
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }

    /// Takes an action based on the action values of a single observation.
    ///
    /// * `q` - action values of shape `[1, n_actions]`.
    pub fn action(&self, q: &Tensor, rng: &mut impl Rng) -> Result<usize> {
        if rng.gen::<f64>() < self.eps {
            let n_actions = q.dims()[q.rank() - 1];
            Ok(rng.gen_range(0..n_actions))
        } else {
            greedy(q)
        }
    }
}

/// Returns the action with the largest value.
///
/// * `q` - action values of shape `[1, n_actions]`.
pub(super) fn greedy(q: &Tensor) -> Result<usize> {
    let a = q.argmax(D::Minus1)?.flatten_all()?.to_vec1::<u32>()?;
    Ok(a[0] as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_epsilon_greedy() -> Result<()> {
        let q = Tensor::from_slice(&[0.1f32, 0.7, -0.2], (1, 3), &Device::Cpu)?;
        let mut rng = SmallRng::seed_from_u64(0);

        let explorer = EpsilonGreedy::new(0.0);
        for _ in 0..20 {
            assert_eq!(explorer.action(&q, &mut rng)?, 1);
        }

        let explorer = EpsilonGreedy::new(1.0);
        let mut counts = [0; 3];
        for _ in 0..300 {
            counts[explorer.action(&q, &mut rng)?] += 1;
        }
        assert!(counts.iter().all(|&c| c > 50));
        Ok(())
    }
}
