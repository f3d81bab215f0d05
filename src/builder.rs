//! Chain builder.
//!
//! `ChainBuilder` is the recommended way to define a chain. It validates sizes as
//! layers are added and draws all weights from a single initializer, layer by layer
//! in order, so a given seed always yields the same parameters.

use crate::config::InitConfig;
use crate::{Activation, DenseLayer, Error, NetworkChain, RandomInitializer, Result};

#[derive(Debug, Clone, Copy)]
struct LayerSpec {
    size: usize,
    activation: Option<Activation>,
}

#[derive(Debug, Clone)]
/// Builder for a `NetworkChain`.
///
/// Example:
///
/// ```rust
/// use rust_dense::{Activation, ChainBuilder};
///
/// # fn main() -> rust_dense::Result<()> {
/// let mut chain = ChainBuilder::new(2)?
///     .add_layer(3, Some(Activation::ReLU))?
///     .add_layer(3, None)?
///     .softmax_output()
///     .build_with_seed(0)?;
///
/// let probs = chain.run(&[0.5, -0.25])?;
/// assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
pub struct ChainBuilder {
    input_size: usize,
    layers: Vec<LayerSpec>,
    softmax_output: bool,
    init: InitConfig,
}

impl ChainBuilder {
    /// Start building a chain that accepts rows of length `input_size`.
    pub fn new(input_size: usize) -> Result<Self> {
        if input_size == 0 {
            return Err(Error::InvalidConfig("input_size must be > 0".to_owned()));
        }
        Ok(Self {
            input_size,
            layers: Vec::new(),
            softmax_output: false,
            init: InitConfig::default(),
        })
    }

    /// Override the weight range and bias constant.
    pub fn init(mut self, init: InitConfig) -> Result<Self> {
        init.validate()?;
        self.init = init;
        Ok(self)
    }

    /// Add a dense layer with `size` outputs.
    pub fn add_layer(mut self, size: usize, activation: Option<Activation>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("layer size must be > 0".to_owned()));
        }
        self.layers.push(LayerSpec { size, activation });
        Ok(self)
    }

    /// Normalize the final layer's output with softmax.
    pub fn softmax_output(mut self) -> Self {
        self.softmax_output = true;
        self
    }

    /// Build using a fresh initializer seeded with `seed` and the configured divisor.
    pub fn build_with_seed(self, seed: u64) -> Result<NetworkChain> {
        let mut rng = RandomInitializer::new(seed, self.init.range_divisor)?;
        self.build_with_initializer(&mut rng)
    }

    /// Build using the provided initializer.
    pub fn build_with_initializer(self, rng: &mut RandomInitializer) -> Result<NetworkChain> {
        if self.layers.is_empty() {
            return Err(Error::InvalidConfig(
                "chain must have at least one layer".to_owned(),
            ));
        }

        let mut layers = Vec::with_capacity(self.layers.len());
        let mut input_size = self.input_size;
        for spec in self.layers {
            let layer =
                DenseLayer::with_init(input_size, spec.size, spec.activation, &self.init, rng)?;
            layers.push(layer);
            input_size = spec.size;
        }

        Ok(NetworkChain::new(layers)?.with_softmax_output(self.softmax_output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_layers_with_matching_sizes() {
        let chain = ChainBuilder::new(4)
            .unwrap()
            .add_layer(5, Some(Activation::ReLU))
            .unwrap()
            .add_layer(2, None)
            .unwrap()
            .build_with_seed(0)
            .unwrap();

        assert_eq!(chain.input_size(), 4);
        assert_eq!(chain.output_size(), 2);
        assert_eq!(chain.layer(0).unwrap().activation(), Some(Activation::ReLU));
        assert_eq!(chain.layer(1).unwrap().activation(), None);
        assert!(!chain.softmax_output());
    }

    #[test]
    fn same_weights_as_layers_built_by_hand() {
        let chain = ChainBuilder::new(4)
            .unwrap()
            .add_layer(5, None)
            .unwrap()
            .add_layer(2, None)
            .unwrap()
            .build_with_seed(0)
            .unwrap();

        let mut rng = RandomInitializer::with_seed(0);
        let l1 = DenseLayer::new(4, 5, None, &mut rng).unwrap();
        let l2 = DenseLayer::new(5, 2, None, &mut rng).unwrap();

        assert_eq!(chain.layer(0).unwrap().weights(), l1.weights());
        assert_eq!(chain.layer(1).unwrap().weights(), l2.weights());
    }

    #[test]
    fn custom_init_range_and_bias() {
        let init = InitConfig {
            weight_low: -1.0,
            weight_high: 1.0,
            bias: 0.5,
            range_divisor: 4,
            ..InitConfig::default()
        };
        let chain = ChainBuilder::new(3)
            .unwrap()
            .init(init)
            .unwrap()
            .add_layer(8, None)
            .unwrap()
            .build_with_seed(1)
            .unwrap();

        let layer = chain.layer(0).unwrap();
        assert_eq!(layer.biases(), &[0.5; 8]);
        for &w in layer.weights().as_slice() {
            assert!([-1.0, -0.5, 0.0, 0.5, 1.0].contains(&w), "unexpected weight {w}");
        }
    }

    #[test]
    fn rejects_invalid_definitions() {
        assert!(ChainBuilder::new(0).is_err());
        assert!(ChainBuilder::new(2).unwrap().add_layer(0, None).is_err());
        assert!(ChainBuilder::new(2).unwrap().build_with_seed(0).is_err());

        let bad = InitConfig {
            weight_low: 1.0,
            weight_high: -1.0,
            ..InitConfig::default()
        };
        assert!(ChainBuilder::new(2).unwrap().init(bad).is_err());
    }
}
