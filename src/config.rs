//! Network configuration.
//!
//! `ChainConfig` describes a chain declaratively: input width, one entry per dense
//! layer, whether the final layer is softmax-normalized, and how parameters are
//! initialized. With the `serde` feature it can be read from and written to JSON.
//! Only the description is serialized; weights are always regenerated from the seed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use std::path::Path;

use crate::init::DEFAULT_RANGE_DIVISOR;
use crate::{Activation, ChainBuilder, Error, NetworkChain, RandomInitializer, Result};

/// Parameter initialization settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitConfig {
    pub seed: u64,
    /// Modulus of the integer sampler behind [`RandomInitializer::next`].
    pub range_divisor: u32,
    pub weight_low: f64,
    pub weight_high: f64,
    /// Constant every bias starts at.
    pub bias: f64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            range_divisor: DEFAULT_RANGE_DIVISOR,
            weight_low: -0.10,
            weight_high: 0.10,
            bias: 0.0,
        }
    }
}

impl InitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.range_divisor == 0 {
            return Err(Error::InvalidConfig(
                "range_divisor must be > 0".to_owned(),
            ));
        }
        if !(self.weight_low.is_finite() && self.weight_high.is_finite())
            || self.weight_high <= self.weight_low
        {
            return Err(Error::InvalidRange {
                low: self.weight_low,
                high: self.weight_high,
            });
        }
        if !self.bias.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "bias must be finite, got {}",
                self.bias
            )));
        }
        Ok(())
    }

    /// A fresh initializer seeded from this config.
    pub fn initializer(&self) -> Result<RandomInitializer> {
        RandomInitializer::new(self.seed, self.range_divisor)
    }
}

/// One dense layer of a chain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerConfig {
    pub size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: Option<Activation>,
}

impl LayerConfig {
    pub fn new(size: usize, activation: Option<Activation>) -> Self {
        Self { size, activation }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub input_size: usize,
    pub layers: Vec<LayerConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub softmax_output: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub init: InitConfig,
}

impl ChainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(Error::InvalidConfig("input_size must be > 0".to_owned()));
        }
        if self.layers.is_empty() {
            return Err(Error::InvalidConfig(
                "chain must have at least one layer".to_owned(),
            ));
        }
        if let Some(i) = self.layers.iter().position(|l| l.size == 0) {
            return Err(Error::InvalidConfig(format!("layer {i} size must be > 0")));
        }
        self.init.validate()
    }

    /// Build the chain, seeding a fresh initializer from `self.init`.
    pub fn build(&self) -> Result<NetworkChain> {
        self.validate()?;

        let mut builder = ChainBuilder::new(self.input_size)?.init(self.init)?;
        for layer in &self.layers {
            builder = builder.add_layer(layer.size, layer.activation)?;
        }
        if self.softmax_output {
            builder = builder.softmax_output();
        }

        let mut rng = self.init.initializer()?;
        builder.build_with_initializer(&mut rng)
    }
}

#[cfg(feature = "serde")]
impl ChainConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: ChainConfig = serde_json::from_str(s)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse chain config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize chain config: {e}")))
    }

    /// Load a config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidConfig(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }
}
