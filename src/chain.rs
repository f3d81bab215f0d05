//! Linear chains of dense layers.
//!
//! A `NetworkChain` evaluates one input row at a time: the row is bound to an
//! [`InputView`] that stands in for a previous layer, then each layer is forwarded
//! from the one before it, in order. Every layer's output buffer is reused across
//! rows, so running a batch performs no per-row allocation.

use log::{debug, trace};

use crate::error::try_alloc;
use crate::layer::{InputView, forward};
use crate::{DenseLayer, Error, Inputs, Result};

#[derive(Debug, Clone)]
pub struct NetworkChain {
    layers: Vec<DenseLayer>,
    softmax_output: bool,
    // Final layer output before softmax, kept for reporting.
    logits: Vec<f64>,
}

/// Per-row view of every layer's output, handed to [`NetworkChain::run_batch`]
/// callbacks.
#[derive(Debug, Clone, Copy)]
pub struct RowOutputs<'a> {
    row: usize,
    layers: &'a [DenseLayer],
    logits: &'a [f64],
}

impl<'a> RowOutputs<'a> {
    /// Index of the batch row these outputs belong to.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Output of layer `idx` (the final one is post-softmax when enabled).
    #[inline]
    pub fn layer_output(&self, idx: usize) -> Option<&'a [f64]> {
        self.layers.get(idx).map(DenseLayer::output)
    }

    pub fn layer_outputs(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.layers.iter().map(DenseLayer::output)
    }

    /// Final layer output before softmax. Equal to [`output`](Self::output) when the
    /// chain has no softmax stage.
    #[inline]
    pub fn logits(&self) -> &'a [f64] {
        self.logits
    }

    #[inline]
    pub fn output(&self) -> &'a [f64] {
        self.layers.last().map_or(&[][..], DenseLayer::output)
    }
}

impl NetworkChain {
    /// Chain `layers` in order. Adjacent layers must agree on size.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let Some(last) = layers.last() else {
            return Err(Error::InvalidConfig(
                "chain must have at least one layer".to_owned(),
            ));
        };

        for pair in layers.windows(2) {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(Error::DimensionMismatch {
                    expected: pair[1].input_size(),
                    actual: pair[0].output_size(),
                });
            }
        }

        let logits = try_alloc(last.output_size(), 0.0, "logits")?;
        debug!(
            "network chain built: {} layers, {} -> {}",
            layers.len(),
            layers[0].input_size(),
            last.output_size()
        );

        Ok(Self {
            layers,
            softmax_output: false,
            logits,
        })
    }

    /// Normalize the final layer with softmax after every forward pass.
    pub fn with_softmax_output(mut self, enabled: bool) -> Self {
        self.softmax_output = enabled;
        self
    }

    #[inline]
    pub fn softmax_output(&self) -> bool {
        self.softmax_output
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    #[inline]
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layer(&self, idx: usize) -> Option<&DenseLayer> {
        self.layers.get(idx)
    }

    #[inline]
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Output of the most recent [`run`](Self::run).
    #[inline]
    pub fn output(&self) -> &[f64] {
        self.layers.last().map_or(&[][..], DenseLayer::output)
    }

    /// Forward one input row through every layer and return the final output.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `input_row.len() != self.input_size()`.
    pub fn run(&mut self, input_row: &[f64]) -> Result<&[f64]> {
        let Some((first, _)) = self.layers.split_first_mut() else {
            return Err(Error::InvalidConfig(
                "chain must have at least one layer".to_owned(),
            ));
        };
        forward(&InputView(input_row), first)?;

        for idx in 1..self.layers.len() {
            // Borrow the previous layer immutably and the current one mutably.
            let (done, pending) = self.layers.split_at_mut(idx);
            forward(&done[idx - 1], &mut pending[0])?;
        }

        let Some(last) = self.layers.last_mut() else {
            return Err(Error::InvalidConfig(
                "chain must have at least one layer".to_owned(),
            ));
        };
        self.logits.copy_from_slice(last.output());
        if self.softmax_output {
            last.softmax();
        }

        Ok(last.output())
    }

    /// Run every row of `batch` in row order, reporting each row's layer outputs.
    pub fn run_batch<F>(&mut self, batch: &Inputs, mut on_row: F) -> Result<()>
    where
        F: FnMut(RowOutputs<'_>),
    {
        self.check_batch(batch)?;

        for (row, input) in batch.rows().enumerate() {
            self.run(input)?;
            trace!("row {row}: output {:?}", self.output());
            on_row(RowOutputs {
                row,
                layers: &self.layers,
                logits: &self.logits,
            });
        }
        Ok(())
    }

    /// Final outputs for every row of `batch`, in row order.
    pub fn predict_batch(&mut self, batch: &Inputs) -> Result<Vec<Vec<f64>>> {
        self.check_batch(batch)?;

        let mut outputs = Vec::with_capacity(batch.len());
        for input in batch.rows() {
            outputs.push(self.run(input)?.to_vec());
        }
        Ok(outputs)
    }

    fn check_batch(&self, batch: &Inputs) -> Result<()> {
        if batch.input_dim() != self.input_size() {
            return Err(Error::DimensionMismatch {
                expected: self.input_size(),
                actual: batch.input_dim(),
            });
        }
        Ok(())
    }
}
