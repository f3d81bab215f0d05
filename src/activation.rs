//! Activation functions.
//!
//! A dense layer applies its activation to each neuron's weighted sum *before* the
//! bias is added: `y_i = act(w_i · x) + b_i`. Softmax is not an activation in this
//! sense; it runs over a whole output vector, see [`crate::softmax`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Element-wise activation function.
pub enum Activation {
    Identity,
    #[cfg_attr(feature = "serde", serde(rename = "relu"))]
    ReLU,
    Sigmoid,
}

impl Activation {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::ReLU => relu(x),
            Activation::Sigmoid => sigmoid(x),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::ReLU => "relu",
            Activation::Sigmoid => "sigmoid",
        }
    }
}

#[inline]
fn relu(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x }
}

// Smallest and largest values representable strictly inside (0, 1).
const SIGMOID_MIN: f64 = f64::MIN_POSITIVE;
const SIGMOID_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

#[inline]
fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid, clamped so saturation never rounds to 0 or 1.
    let y = if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    };
    y.clamp(SIGMOID_MIN, SIGMOID_MAX)
}
