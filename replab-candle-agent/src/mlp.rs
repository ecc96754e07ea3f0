//! Multilayer perceptron.
mod config;
use candle_core::{Result, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
pub use config::MlpConfig;

/// Multilayer perceptron with ReLU activation function.
///
/// The output layer is linear.
pub struct Mlp {
    layers: Vec<Linear>,
}

impl Mlp {
    /// Creates the layers under the prefix of `vb`.
    ///
    /// Layer `i` is named `ln{i}`.
    pub fn build(vb: VarBuilder, config: &MlpConfig) -> Result<Self> {
        let dims = config.dims();
        let layers = dims
            .windows(2)
            .enumerate()
            .map(|(i, w)| linear(w[0], w[1], vb.pp(format!("ln{}", i))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { layers })
    }
}

impl Module for Mlp {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let n_layers = self.layers.len();
        let mut xs = xs.clone();

        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i + 1 < n_layers {
                xs = xs.relu()?;
            }
        }

        Ok(xs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::VarMap;

    #[test]
    fn test_output_shape() -> Result<()> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let config = MlpConfig::new(3, vec![8, 8], 2);
        let mlp = Mlp::build(vb.pp("q"), &config)?;

        let xs = Tensor::zeros((5, 3), DType::F32, &Device::Cpu)?;
        assert_eq!(mlp.forward(&xs)?.dims(), &[5, 2]);

        // weight and bias of three layers
        assert_eq!(varmap.all_vars().len(), 6);
        assert!(varmap.data().lock().unwrap().contains_key("q.ln2.weight"));
        Ok(())
    }
}
