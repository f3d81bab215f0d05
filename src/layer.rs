//! Dense (fully-connected) layer.
//!
//! A layer owns three buffers, all allocated once at construction:
//!
//! - `weights`: row-major `(output_size, input_size)`; row `i` feeds neuron `i`
//! - `biases`: one per neuron
//! - `output`: the most recent forward result, overwritten on every call
//!
//! For each neuron the forward step computes `act(w_i · x) + b_i`. The activation is
//! applied to the weighted sum and the bias is added afterwards; outputs produced by
//! existing models depend on this order.

use log::debug;

use crate::config::InitConfig;
use crate::error::try_alloc;
use crate::matrix::{Matrix, dot};
use crate::{Activation, Error, RandomInitializer, Result, softmax};

/// Anything that can feed a [`DenseLayer`]: a previous layer or a borrowed input row.
pub trait LayerOutput {
    fn output(&self) -> &[f64];
}

/// Borrowed view over one row of caller-supplied features.
///
/// Stands in for the "previous layer" of the first dense layer in a chain.
#[derive(Debug, Clone, Copy)]
pub struct InputView<'a>(pub &'a [f64]);

impl LayerOutput for InputView<'_> {
    #[inline]
    fn output(&self) -> &[f64] {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Matrix,
    biases: Vec<f64>,
    output: Vec<f64>,
    activation: Option<Activation>,
}

impl DenseLayer {
    /// Build a layer with zero biases and weights drawn from `rng.next(-0.10, 0.10)`.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Option<Activation>,
        rng: &mut RandomInitializer,
    ) -> Result<Self> {
        Self::with_init(
            input_size,
            output_size,
            activation,
            &InitConfig::default(),
            rng,
        )
    }

    /// Build a layer using the weight range and bias constant from `init`.
    ///
    /// `init` is validated first. Its `seed` and `range_divisor` only describe how `rng`
    /// itself was built.
    pub fn with_init(
        input_size: usize,
        output_size: usize,
        activation: Option<Activation>,
        init: &InitConfig,
        rng: &mut RandomInitializer,
    ) -> Result<Self> {
        check_sizes(input_size, output_size)?;
        init.validate()?;

        let mut weights = Matrix::zeros(output_size, input_size)?;
        let biases = try_alloc(output_size, init.bias, "biases")?;
        let output = try_alloc(output_size, 0.0, "output")?;

        for w in weights.as_mut_slice() {
            *w = rng.next(init.weight_low, init.weight_high)?;
        }

        debug!(
            "dense layer {input_size}x{output_size} activation={} initialized (weights in [{}, {}], bias {})",
            activation.map_or("none", Activation::name),
            init.weight_low,
            init.weight_high,
            init.bias
        );

        Ok(Self {
            weights,
            biases,
            output,
            activation,
        })
    }

    /// Build a layer from explicit parameters.
    ///
    /// `weights` is row-major `(output_size, input_size)`. All parameters must be finite.
    pub fn from_parts(
        input_size: usize,
        output_size: usize,
        activation: Option<Activation>,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> Result<Self> {
        check_sizes(input_size, output_size)?;

        let weights = Matrix::from_vec(output_size, input_size, weights)?;
        if biases.len() != output_size {
            return Err(Error::DimensionMismatch {
                expected: output_size,
                actual: biases.len(),
            });
        }
        if weights.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "weights must contain only finite values".to_owned(),
            ));
        }
        if biases.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "biases must contain only finite values".to_owned(),
            ));
        }

        let output = try_alloc(output_size, 0.0, "output")?;
        Ok(Self {
            weights,
            biases,
            output,
            activation,
        })
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    #[inline]
    pub fn output_size(&self) -> usize {
        self.weights.rows()
    }

    #[inline]
    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Output of the most recent forward pass (zeros before the first one).
    #[inline]
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Forward pass for a single row, writing into the layer's own output buffer.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        // Split borrows: parameters are read while `output` is written.
        let Self {
            weights,
            biases,
            output,
            activation,
        } = self;
        compute(weights, biases, *activation, input, output)?;
        Ok(output.as_slice())
    }

    /// Forward pass into a caller-owned buffer, leaving the layer untouched.
    ///
    /// Shape contract:
    /// - `input.len() == self.input_size()`
    /// - `out.len() == self.output_size()`
    pub fn forward_into(&self, input: &[f64], out: &mut [f64]) -> Result<()> {
        compute(&self.weights, &self.biases, self.activation, input, out)
    }

    /// Replace the current output with its softmax.
    #[inline]
    pub fn softmax(&mut self) {
        softmax::softmax(&mut self.output);
    }
}

impl LayerOutput for DenseLayer {
    #[inline]
    fn output(&self) -> &[f64] {
        &self.output
    }
}

/// Propagate `prev`'s output through `next`, overwriting `next`'s output.
///
/// Fails with [`Error::DimensionMismatch`] when `prev` does not produce exactly
/// `next.input_size()` values; `next` is left unchanged in that case.
pub fn forward<P: LayerOutput + ?Sized>(prev: &P, next: &mut DenseLayer) -> Result<()> {
    next.forward(prev.output()).map(|_| ())
}

fn compute(
    weights: &Matrix,
    biases: &[f64],
    activation: Option<Activation>,
    input: &[f64],
    out: &mut [f64],
) -> Result<()> {
    if input.len() != weights.cols() {
        return Err(Error::DimensionMismatch {
            expected: weights.cols(),
            actual: input.len(),
        });
    }
    if out.len() != weights.rows() {
        return Err(Error::DimensionMismatch {
            expected: weights.rows(),
            actual: out.len(),
        });
    }

    for ((o, row), &b) in out.iter_mut().zip(weights.iter_rows()).zip(biases) {
        let mut sum = dot(input, row);
        if let Some(act) = activation {
            sum = act.apply(sum);
        }
        *o = sum + b;
    }
    Ok(())
}

fn check_sizes(input_size: usize, output_size: usize) -> Result<()> {
    if input_size == 0 || output_size == 0 {
        return Err(Error::InvalidConfig(format!(
            "layer sizes must be > 0, got input_size={input_size} output_size={output_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_neuron_dot_product() {
        let mut layer =
            DenseLayer::from_parts(3, 1, None, vec![3.1, 2.1, 8.7], vec![3.0]).unwrap();
        let out = layer.forward(&[1.0, 2.0, 3.0]).unwrap();
        assert!((out[0] - 36.4).abs() < 1e-9, "got {}", out[0]);
    }

    #[test]
    fn activation_is_applied_before_bias() {
        // Weighted sum is -2; ReLU clamps it to 0 and then the bias is added.
        let mut layer =
            DenseLayer::from_parts(2, 1, Some(Activation::ReLU), vec![1.0, -1.5], vec![0.5])
                .unwrap();
        let out = layer.forward(&[1.0, 2.0]).unwrap();
        assert_eq!(out, &[0.5]);

        // A negative bias can therefore push a ReLU neuron below zero.
        let mut layer =
            DenseLayer::from_parts(1, 1, Some(Activation::ReLU), vec![1.0], vec![-1.0]).unwrap();
        assert_eq!(layer.forward(&[0.25]).unwrap(), &[-0.75]);
    }

    #[test]
    fn rows_map_to_neurons() {
        let mut layer = DenseLayer::from_parts(
            2,
            3,
            None,
            vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 10.0],
        )
        .unwrap();
        let out = layer.forward(&[2.0, 3.0]).unwrap();
        assert_eq!(out, &[2.0, 3.0, 15.0]);
    }

    #[test]
    fn construction_is_deterministic() {
        let mut rng_a = RandomInitializer::with_seed(0);
        let mut rng_b = RandomInitializer::with_seed(0);
        let a = DenseLayer::new(4, 5, None, &mut rng_a).unwrap();
        let b = DenseLayer::new(4, 5, None, &mut rng_b).unwrap();

        let bits_a: Vec<u64> = a.weights().as_slice().iter().map(|w| w.to_bits()).collect();
        let bits_b: Vec<u64> = b.weights().as_slice().iter().map(|w| w.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn construction_initializes_buffers() {
        let mut rng = RandomInitializer::with_seed(0);
        let layer = DenseLayer::new(4, 5, Some(Activation::Sigmoid), &mut rng).unwrap();

        assert_eq!(layer.input_size(), 4);
        assert_eq!(layer.output_size(), 5);
        assert_eq!(layer.weights().len(), 20);
        assert_eq!(layer.biases(), &[0.0; 5]);
        assert_eq!(layer.output(), &[0.0; 5]);
        assert!(
            layer
                .weights()
                .as_slice()
                .iter()
                .all(|w| (-0.1..=0.1).contains(w))
        );
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut rng = RandomInitializer::with_seed(0);
        assert!(matches!(
            DenseLayer::new(0, 3, None, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            DenseLayer::new(3, 0, None, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_layer_fails_to_allocate() {
        let mut rng = RandomInitializer::with_seed(0);
        let err = DenseLayer::new(usize::MAX, 2, None, &mut rng).unwrap_err();
        assert!(matches!(err, Error::AllocationFailure(_)));
    }

    #[test]
    fn forward_between_mismatched_layers_fails_cleanly() {
        let mut rng = RandomInitializer::with_seed(0);
        let mut prev = DenseLayer::new(2, 3, None, &mut rng).unwrap();
        let mut next = DenseLayer::new(4, 2, None, &mut rng).unwrap();

        forward(&InputView(&[1.0, 2.0]), &mut prev).unwrap();
        let before = next.output().to_vec();

        let err = forward(&prev, &mut next).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(next.output(), before.as_slice());
    }

    #[test]
    fn forward_into_matches_forward() {
        let mut rng = RandomInitializer::with_seed(11);
        let mut layer = DenseLayer::new(3, 4, Some(Activation::Sigmoid), &mut rng).unwrap();
        let input = [0.5, -1.0, 2.0];

        let mut scratch = [0.0; 4];
        layer.forward_into(&input, &mut scratch).unwrap();
        assert_eq!(layer.forward(&input).unwrap(), &scratch);

        let mut short = [0.0; 3];
        assert!(layer.forward_into(&input, &mut short).is_err());
    }

    #[test]
    fn layer_softmax_normalizes_output() {
        let mut layer =
            DenseLayer::from_parts(1, 3, None, vec![1.0, 2.0, 3.0], vec![0.0; 3]).unwrap();
        layer.forward(&[1.0]).unwrap();
        layer.softmax();
        let sum: f64 = layer.output().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn with_init_rejects_non_finite_bias() {
        let mut rng = RandomInitializer::with_seed(0);
        for bias in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let init = InitConfig {
                bias,
                ..InitConfig::default()
            };
            assert!(matches!(
                DenseLayer::with_init(2, 3, None, &init, &mut rng),
                Err(Error::InvalidConfig(_))
            ));
        }

        let init = InitConfig {
            weight_low: 0.5,
            weight_high: -0.5,
            ..InitConfig::default()
        };
        assert!(matches!(
            DenseLayer::with_init(2, 3, None, &init, &mut rng),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn from_parts_validates() {
        assert!(DenseLayer::from_parts(2, 1, None, vec![1.0], vec![0.0]).is_err());
        assert!(DenseLayer::from_parts(1, 2, None, vec![1.0, 1.0], vec![0.0]).is_err());
        assert!(matches!(
            DenseLayer::from_parts(1, 1, None, vec![f64::NAN], vec![0.0]),
            Err(Error::InvalidData(_))
        ));
    }
}
