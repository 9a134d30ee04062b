//! Dense linear algebra for the training passes.
//!
//! The forward and backward passes are closed-form array operations over
//! small dense matrices. This module provides the [`Matrix`] type and the
//! handful of vectorized helpers those passes need.

mod dense;

pub use dense::Matrix;
