//! The feed-forward network: parameters and hand-derived passes.
//!
//! This module provides the core types for the training math:
//!
//! - [`Parameters`]: per-layer weight/bias pairs with seeded initialization
//! - [`ForwardCache`]: transient per-call record consumed by the backward pass
//! - [`Gradients`]: gradient arrays mirroring the parameter shapes
//! - [`forward`] / [`forward_with_dropout`]: activations from inputs
//! - [`backward`]: reverse chain-rule gradient computation
//!
//! There is no automatic differentiation: each layer's gradient is the
//! closed-form derivative of its affine step and activation.

mod activation;
mod backward;
mod forward;
mod params;

pub use activation::{relu, sigmoid};
pub use backward::{backward, Gradients, LayerGradients};
pub use forward::{forward, forward_with_dropout, ForwardCache};
pub use params::{LayerParams, Parameters, HIDDEN_UNITS};
