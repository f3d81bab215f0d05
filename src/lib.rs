//! A small dense feed-forward inference engine.
//!
//! `rust-dense` evaluates linear chains of fully-connected layers. It does inference
//! only: there are no gradients, losses or optimizers. Alongside the engine it ships a
//! synthetic spiral dataset generator for exercising multi-class outputs.
//!
//! # Building blocks
//!
//! - [`RandomInitializer`]: explicit, seeded source of all randomness.
//! - [`DenseLayer`]: weights, biases and an output buffer, allocated once.
//! - [`Activation`]: `Identity`, `ReLU` or `Sigmoid`, applied per neuron.
//! - [`softmax()`]: normalizes a whole output vector after a forward step.
//! - [`NetworkChain`]: forwards one input row through every layer in order.
//! - [`SpiralDataset`]: interleaved spiral arms, one class per arm.
//!
//! # Neuron formula
//!
//! Each neuron computes `act(w · x) + b`: the activation sees the weighted sum and the
//! bias is added afterwards. Layers without an activation compute the usual `w · x + b`.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`.
//! - Layer weights are row-major with shape `(output_size, input_size)`.
//! - [`Inputs`] stores a batch contiguously, one row per sample.
//!
//! Shape mismatches are returned as [`Error::DimensionMismatch`]; nothing in the
//! forward path reads or writes outside a buffer.
//!
//! # Quick start
//!
//! ```rust
//! use rust_dense::{Activation, ChainBuilder, RandomInitializer, SpiralDataset};
//!
//! # fn main() -> rust_dense::Result<()> {
//! let mut rng = RandomInitializer::new(0, 5)?;
//! let data = SpiralDataset::generate(100, 3, &mut rng)?;
//!
//! let mut chain = ChainBuilder::new(2)?
//!     .add_layer(3, Some(Activation::ReLU))?
//!     .add_layer(3, None)?
//!     .softmax_output()
//!     .build_with_initializer(&mut rng)?;
//!
//! let probs = chain.predict_batch(&data.to_inputs()?)?;
//! assert_eq!(probs.len(), data.len());
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod chain;
pub mod config;
pub mod data;
pub mod error;
pub mod init;
pub mod layer;
pub mod matrix;
pub mod softmax;
pub mod spiral;

pub use activation::Activation;
pub use builder::ChainBuilder;
pub use chain::{NetworkChain, RowOutputs};
pub use config::{ChainConfig, InitConfig, LayerConfig};
pub use data::Inputs;
pub use error::{Error, Result};
pub use init::RandomInitializer;
pub use layer::{DenseLayer, InputView, LayerOutput, forward};
pub use matrix::Matrix;
pub use softmax::softmax;
pub use spiral::SpiralDataset;
