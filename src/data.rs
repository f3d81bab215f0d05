//! Contiguous batches of input rows.
//!
//! A batch is stored row-major in one buffer so the chain can hand out each row as a
//! borrowed slice without copying.

use crate::{Error, Result};

/// A batch of input rows (X).
///
/// Stored as a contiguous buffer with row-major layout:
/// - `inputs.len() == len * input_dim`
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    inputs: Vec<f64>,
    len: usize,
    input_dim: usize,
}

impl Inputs {
    /// Build inputs from a flat buffer with shape `(len, input_dim)`.
    pub fn from_flat(inputs: Vec<f64>, input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }
        if !inputs.len().is_multiple_of(input_dim) {
            return Err(Error::InvalidData(format!(
                "inputs length {} is not divisible by input_dim {}",
                inputs.len(),
                input_dim
            )));
        }

        let len = inputs.len() / input_dim;

        Ok(Self {
            inputs,
            len,
            input_dim,
        })
    }

    /// Build inputs from per-row slices.
    ///
    /// This is a convenience constructor (it copies into contiguous storage).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::InvalidData("inputs must not be empty".to_owned()));
        };

        let input_dim = first.as_ref().len();
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.as_ref().len() != input_dim {
                return Err(Error::InvalidData(format!(
                    "input row {i} has len {}, expected {input_dim}",
                    row.as_ref().len()
                )));
            }
        }

        let len = rows.len();
        let mut inputs = Vec::with_capacity(len * input_dim);
        for row in rows {
            inputs.extend_from_slice(row.as_ref());
        }

        Ok(Self {
            inputs,
            len,
            input_dim,
        })
    }

    #[inline]
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    /// Returns the per-row input dimension.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    /// Returns the `idx`-th row, or `None` if `idx >= len`.
    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        if idx >= self.len {
            return None;
        }
        let start = idx * self.input_dim;
        self.inputs.get(start..start + self.input_dim)
    }

    #[inline]
    /// Iterate rows in order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.inputs.chunks_exact(self.input_dim)
    }
}
