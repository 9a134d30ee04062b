//! Shared helpers for integration tests.
//!
//! For assertion helpers, use `mlp_rs::testing`.

#![allow(dead_code)]

use mlp_rs::data::{synthetic, Dataset};
use mlp_rs::training::{Regularization, TrainerParams, Verbosity};

// Re-export testing utilities for convenience
#[allow(unused_imports)]
pub use mlp_rs::testing::{
    assert_slices_approx_eq, finite_difference_gradients, DEFAULT_TOLERANCE, DEFAULT_TOLERANCE_F64,
};
#[allow(unused_imports)]
pub use mlp_rs::{assert_approx_eq, assert_approx_eq_f64};

/// A small linearly separable dataset for convergence checks.
pub fn separable_dataset() -> Dataset {
    synthetic::linearly_separable(40, 5)
}

/// A small two-arcs dataset for the non-linearly-separable cases.
pub fn arcs_dataset() -> Dataset {
    synthetic::two_arcs(60, 0.05, 2)
}

/// Silent trainer parameters with a short iteration count.
pub fn quiet_params(n_iterations: u32, regularization: Regularization) -> TrainerParams {
    TrainerParams {
        n_iterations,
        regularization,
        verbosity: Verbosity::Silent,
        ..Default::default()
    }
}
