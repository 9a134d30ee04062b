//! Testing utilities for mlp-rs.
//!
//! This module provides approximate-equality assertion helpers and a
//! finite-difference gradient checker, usable from both unit tests and
//! integration tests:
//!
//! ```ignore
//! use mlp_rs::testing::{finite_difference_gradients, DEFAULT_TOLERANCE};
//! use mlp_rs::assert_approx_eq;
//! ```

use crate::linalg::Matrix;
use crate::network::{forward, LayerGradients, Parameters};
use crate::training::{training_cost, Regularization};

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons on O(1) values.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// The same default tolerance for `f64` comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-5;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two `f32` values are approximately equal.
///
/// # Examples
///
/// ```
/// # use mlp_rs::assert_approx_eq;
/// assert_approx_eq!(1.0f32, 1.0001f32, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val = $left;
        let right_val = $right;
        let tol = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two `f64` values are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two `f32` slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics on length mismatch or any element pair differing by more than
/// `tolerance`.
pub fn assert_slices_approx_eq(left: &[f32], right: &[f32], tolerance: f32) {
    assert_eq!(
        left.len(),
        right.len(),
        "slice lengths differ: {} vs {}",
        left.len(),
        right.len()
    );
    for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        assert!(
            (l - r).abs() <= tolerance,
            "slices differ at index {i}: {l} vs {r} (tolerance {tolerance})"
        );
    }
}

// =============================================================================
// Gradient checking
// =============================================================================

/// Numerically estimate the cost gradients by central finite differences.
///
/// Perturbs every weight and bias entry by `±epsilon` and differences the
/// resulting costs. `l2_lambda == 0` checks the plain cross-entropy path;
/// a non-zero value checks the L2-penalized path. Dropout is inherently
/// stochastic and cannot be checked this way.
///
/// Returns per-layer gradients in the same shapes as the analytic ones.
pub fn finite_difference_gradients(
    x: &Matrix,
    y: &Matrix,
    params: &Parameters,
    l2_lambda: f32,
    epsilon: f32,
) -> Vec<LayerGradients> {
    let regularization = Regularization::from_hyperparams(l2_lambda, 1.0);
    let cost_at = |p: &Parameters| {
        let (output, _) = forward(x, p);
        training_cost(&output, y, p, &regularization)
    };

    let mut gradients = Vec::with_capacity(params.num_layers());
    for l in 0..params.num_layers() {
        let (w_rows, w_cols) = params.layer(l).weight.shape();
        let mut d_weight = Matrix::zeros(w_rows, w_cols);
        for i in 0..w_rows {
            for j in 0..w_cols {
                let base = params.layer(l).weight.get(i, j);

                let mut plus = params.clone();
                plus.layer_mut(l).weight.set(i, j, base + epsilon);
                let mut minus = params.clone();
                minus.layer_mut(l).weight.set(i, j, base - epsilon);

                let grad = (cost_at(&plus) - cost_at(&minus)) / (2.0 * epsilon as f64);
                d_weight.set(i, j, grad as f32);
            }
        }

        let b_rows = params.layer(l).bias.rows();
        let mut d_bias = Matrix::zeros(b_rows, 1);
        for i in 0..b_rows {
            let base = params.layer(l).bias.get(i, 0);

            let mut plus = params.clone();
            plus.layer_mut(l).bias.set(i, 0, base + epsilon);
            let mut minus = params.clone();
            minus.layer_mut(l).bias.set(i, 0, base - epsilon);

            let grad = (cost_at(&plus) - cost_at(&minus)) / (2.0 * epsilon as f64);
            d_bias.set(i, 0, grad as f32);
        }

        gradients.push(LayerGradients { d_weight, d_bias });
    }

    gradients
}
