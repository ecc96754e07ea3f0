use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`](super::Mlp).
pub struct MlpConfig {
    /// Dimension of the input.
    pub in_dim: usize,

    /// Number of units of the hidden layers.
    pub units: Vec<usize>,

    /// Dimension of the output.
    pub out_dim: usize,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self::new(4, vec![128], 2)
    }
}

impl MlpConfig {
    /// Creates configuration of MLP.
    pub fn new(in_dim: usize, units: Vec<usize>, out_dim: usize) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
        }
    }

    /// Input and output dimensions of all layers in order.
    pub(super) fn dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.units.len() + 2);
        dims.push(self.in_dim);
        dims.extend_from_slice(&self.units);
        dims.push(self.out_dim);
        dims
    }
}
