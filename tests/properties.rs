use proptest::prelude::*;

use rust_dense::{Activation, softmax};

fn softmaxed(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    softmax(&mut out);
    out
}

proptest! {
    #[test]
    fn softmax_sums_to_one(values in prop::collection::vec(-1e3_f64..1e3, 1..32)) {
        let out = softmaxed(&values);
        let sum: f64 = out.iter().sum();
        prop_assert!((sum - 1.0).abs() <= 1e-9, "sum = {}", sum);
        prop_assert!(out.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn softmax_is_shift_invariant(
        values in prop::collection::vec(-100.0_f64..100.0, 1..16),
        shift in -1e3_f64..1e3,
    ) {
        let base = softmaxed(&values);
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        let moved = softmaxed(&shifted);
        for (a, b) in base.iter().zip(&moved) {
            prop_assert!((a - b).abs() <= 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn softmax_preserves_order(values in prop::collection::vec(-50.0_f64..50.0, 2..16)) {
        let out = softmaxed(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] < values[j] {
                    prop_assert!(out[i] <= out[j]);
                }
            }
        }
    }

    #[test]
    fn relu_clamps_negatives(x in -1e6_f64..1e6) {
        let y = Activation::ReLU.apply(x);
        if x < 0.0 {
            prop_assert_eq!(y, 0.0);
        } else {
            prop_assert_eq!(y, x);
        }
    }

    #[test]
    fn sigmoid_is_strictly_inside_unit_interval(x in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let y = Activation::Sigmoid.apply(x);
        prop_assert!(y > 0.0 && y < 1.0, "sigmoid({}) = {}", x, y);
    }

    #[test]
    fn identity_is_identity(x in prop::num::f64::NORMAL) {
        prop_assert_eq!(Activation::Identity.apply(x), x);
    }
}
