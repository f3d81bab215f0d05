//! Deterministic parameter initialization.
//!
//! Every source of randomness in this crate is a [`RandomInitializer`] passed by
//! `&mut` reference. There is no process-wide generator: two initializers built with
//! the same seed produce the same sequence of values for the same sequence of calls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Result};

/// Default modulus of the bounded integer sampler.
pub const DEFAULT_RANGE_DIVISOR: u32 = 10;

/// Seeded generator of values in a caller-specified `[low, high]` range.
///
/// [`next`](Self::next) is quantized: it draws an integer `k` in `0..=range_divisor`
/// and returns `low + k / (range_divisor / (high - low))`. A smaller divisor gives
/// coarser (less dispersed) weights; it does not change the algorithm.
#[derive(Debug, Clone)]
pub struct RandomInitializer {
    rng: StdRng,
    seed: u64,
    range_divisor: u32,
}

impl RandomInitializer {
    pub fn new(seed: u64, range_divisor: u32) -> Result<Self> {
        if range_divisor == 0 {
            return Err(Error::InvalidConfig(
                "range_divisor must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            range_divisor,
        })
    }

    /// Initializer with [`DEFAULT_RANGE_DIVISOR`].
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            range_divisor: DEFAULT_RANGE_DIVISOR,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn range_divisor(&self) -> u32 {
        self.range_divisor
    }

    /// Bounded integer sample in `0..=range_divisor`.
    #[inline]
    pub fn raw_sample(&mut self) -> u32 {
        self.rng.gen_range(0..=self.range_divisor)
    }

    /// Quantized sample in `[low, high]`.
    pub fn next(&mut self, low: f64, high: f64) -> Result<f64> {
        check_range(low, high)?;
        let div = f64::from(self.range_divisor) / (high - low);
        Ok(low + f64::from(self.raw_sample()) / div)
    }

    /// Continuous uniform sample in `[low, high]`.
    pub fn uniform(&mut self, low: f64, high: f64) -> Result<f64> {
        check_range(low, high)?;
        Ok(self.rng.gen_range(low..=high))
    }
}

#[inline]
fn check_range(low: f64, high: f64) -> Result<()> {
    if !(low.is_finite() && high.is_finite()) || high <= low {
        return Err(Error::InvalidRange { low, high });
    }
    Ok(())
}
