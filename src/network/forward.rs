//! Forward pass through the network.

use rand::Rng;

use crate::linalg::Matrix;

use super::activation::{relu, sigmoid};
use super::Parameters;

/// Per-call record of the forward pass.
///
/// Holds each layer's pre-activation `z[l]` and activation `a[l]`, plus the
/// sampled keep-mask per hidden layer when dropout is active. Produced by
/// the forward pass and consumed immediately by the matching backward pass;
/// never retained across iterations.
#[derive(Debug, Clone)]
pub struct ForwardCache {
    pre_activations: Vec<Matrix>,
    activations: Vec<Matrix>,
    keep_masks: Vec<Option<Matrix>>,
    keep_prob: f32,
}

impl ForwardCache {
    /// Pre-activation `z` of the given layer.
    #[inline]
    pub fn pre_activation(&self, layer: usize) -> &Matrix {
        &self.pre_activations[layer]
    }

    /// Activation `a` of the given layer (after dropout, when active).
    #[inline]
    pub fn activation(&self, layer: usize) -> &Matrix {
        &self.activations[layer]
    }

    /// Keep-mask of the given layer; `None` for the output layer and for
    /// non-dropout passes.
    #[inline]
    pub fn keep_mask(&self, layer: usize) -> Option<&Matrix> {
        self.keep_masks[layer].as_ref()
    }

    /// Keep probability the masks were sampled with; `1.0` when dropout was
    /// not active.
    #[inline]
    pub fn keep_prob(&self) -> f32 {
        self.keep_prob
    }

    /// Number of recorded layers.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.activations.len()
    }
}

/// Forward pass: ReLU through the hidden layers, sigmoid on the output.
///
/// Returns the output activation (shape `(1, num_samples)` for the binary
/// head) and the cache the backward pass consumes.
///
/// # Panics
///
/// Panics if `x.rows()` does not match the network's input dimension.
pub fn forward(x: &Matrix, params: &Parameters) -> (Matrix, ForwardCache) {
    forward_pass(x, params, None::<(f32, &mut rand::rngs::ThreadRng)>)
}

/// Forward pass with inverted dropout on the hidden layers.
///
/// After each hidden activation, every unit is independently zeroed with
/// probability `1 - keep_prob` (masks are resampled on every call) and the
/// survivors are rescaled by `1 / keep_prob`, keeping the expected
/// activation magnitude constant. The output layer is never masked.
///
/// # Panics
///
/// Panics if `keep_prob` is not in `(0, 1)` or the input shape mismatches.
pub fn forward_with_dropout<R: Rng>(
    x: &Matrix,
    params: &Parameters,
    keep_prob: f32,
    rng: &mut R,
) -> (Matrix, ForwardCache) {
    assert!(
        keep_prob > 0.0 && keep_prob < 1.0,
        "keep_prob must be in (0, 1), got {keep_prob}"
    );
    forward_pass(x, params, Some((keep_prob, rng)))
}

fn forward_pass<R: Rng>(
    x: &Matrix,
    params: &Parameters,
    mut dropout: Option<(f32, &mut R)>,
) -> (Matrix, ForwardCache) {
    assert_eq!(
        x.rows(),
        params.input_dim(),
        "input has {} features but the network expects {}",
        x.rows(),
        params.input_dim()
    );

    let num_layers = params.num_layers();
    let mut pre_activations = Vec::with_capacity(num_layers);
    let mut activations = Vec::with_capacity(num_layers);
    let mut keep_masks = Vec::with_capacity(num_layers);

    let mut a_prev = x.clone();
    for (l, layer) in params.layers().iter().enumerate() {
        let mut z = layer.weight.matmul(&a_prev);
        z.add_col_broadcast(&layer.bias);

        let is_output = l + 1 == num_layers;
        let mut a = if is_output {
            z.map(sigmoid)
        } else {
            z.map(relu)
        };

        let mask = match &mut dropout {
            Some((keep_prob, rng)) if !is_output => {
                let kp = *keep_prob;
                let mask = Matrix::from_fn(a.rows(), a.cols(), |_, _| {
                    if rng.gen::<f32>() < kp {
                        1.0
                    } else {
                        0.0
                    }
                });
                a = a.zip_map(&mask, |v, m| v * m / kp);
                Some(mask)
            }
            _ => None,
        };

        pre_activations.push(z);
        keep_masks.push(mask);
        activations.push(a.clone());
        a_prev = a;
    }

    let keep_prob = dropout.map(|(kp, _)| kp).unwrap_or(1.0);
    let cache = ForwardCache {
        pre_activations,
        activations,
        keep_masks,
        keep_prob,
    };
    (a_prev, cache)
}
