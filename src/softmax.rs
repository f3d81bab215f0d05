//! Softmax normalization over a whole output vector.
//!
//! This is a post-processing pass, run once after a layer's forward step. It is
//! never applied per neuron.

/// Normalize `values` in place into a distribution summing to 1.
///
/// Subtracts the maximum before exponentiating so large logits do not overflow.
/// An empty slice is left untouched.
pub fn softmax(values: &mut [f64]) {
    let Some(&first) = values.first() else {
        return;
    };

    let mut max = first;
    for &v in values.iter().skip(1) {
        if v > max {
            max = v;
        }
    }

    let mut sum = 0.0_f64;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }

    for v in values.iter_mut() {
        *v /= sum;
    }
}

/// Sum of a vector; after [`softmax`] this is 1 up to rounding.
#[inline]
pub fn sum_output(values: &[f64]) -> f64 {
    values.iter().sum()
}
