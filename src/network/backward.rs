//! Backward pass: hand-derived reverse chain rule.

use crate::linalg::Matrix;

use super::{ForwardCache, Parameters};

/// Gradients of one layer, mirroring [`super::LayerParams`] shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub d_weight: Matrix,
    pub d_bias: Matrix,
}

/// Gradients for all layers.
///
/// Produced by [`backward`], consumed by
/// [`Parameters::apply_gradients`](super::Parameters::apply_gradients), then
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    layers: Vec<LayerGradients>,
}

impl Gradients {
    /// Number of layers.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Gradients of one layer.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= self.num_layers()`.
    #[inline]
    pub fn layer(&self, layer: usize) -> &LayerGradients {
        &self.layers[layer]
    }

    /// All layer gradients in order.
    #[inline]
    pub fn layers(&self) -> &[LayerGradients] {
        &self.layers
    }
}

/// Compute parameter gradients for the binary cross-entropy cost.
///
/// Walks the layers in reverse. For the sigmoid output under cross-entropy
/// the error simplifies to `dz = a - y`; for each hidden layer the error is
/// propagated as `da = Wᵀ·dz` and gated by the ReLU derivative. When the
/// cache carries dropout masks, `da` is multiplied by the same mask sampled
/// in the forward pass and rescaled by `1/keep_prob`, so pruned units
/// contribute zero gradient. When `l2_lambda != 0`, each weight gradient
/// gains the penalty term `(l2_lambda / m) · W`.
///
/// # Panics
///
/// Panics if `x`, `y` and the cache disagree on shapes.
pub fn backward(
    x: &Matrix,
    y: &Matrix,
    params: &Parameters,
    cache: &ForwardCache,
    l2_lambda: f32,
) -> Gradients {
    let num_layers = params.num_layers();
    assert_eq!(cache.num_layers(), num_layers, "cache/parameter layer mismatch");
    assert_eq!(
        y.shape(),
        cache.activation(num_layers - 1).shape(),
        "label shape {:?} does not match output shape {:?}",
        y.shape(),
        cache.activation(num_layers - 1).shape()
    );

    let m = x.cols() as f32;
    let inv_keep_prob = 1.0 / cache.keep_prob();

    // Output error for sigmoid + cross-entropy
    let mut dz = cache.activation(num_layers - 1).zip_map(y, |a, t| a - t);

    let mut reversed = Vec::with_capacity(num_layers);
    for l in (0..num_layers).rev() {
        let a_prev = if l == 0 { x } else { cache.activation(l - 1) };

        let mut d_weight = dz.matmul_transpose_rhs(a_prev).scale(1.0 / m);
        if l2_lambda != 0.0 {
            d_weight.add_scaled_assign(&params.layer(l).weight, l2_lambda / m);
        }
        let d_bias = dz.row_sums().scale(1.0 / m);

        if l > 0 {
            let mut da_prev = params.layer(l).weight.transpose_matmul(&dz);
            if let Some(mask) = cache.keep_mask(l - 1) {
                da_prev = da_prev.zip_map(mask, |d, keep| d * keep * inv_keep_prob);
            }
            // ReLU derivative: pass gradient only where the pre-activation
            // was positive.
            dz = da_prev.zip_map(cache.pre_activation(l - 1), |d, z| {
                if z > 0.0 {
                    d
                } else {
                    0.0
                }
            });
        }

        reversed.push(LayerGradients { d_weight, d_bias });
    }

    reversed.reverse();
    Gradients { layers: reversed }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use crate::network::{forward, forward_with_dropout};

    use super::*;

    fn toy_problem() -> (Matrix, Matrix, Parameters) {
        let x = Matrix::from_vec(vec![0.5, -1.0, 1.5, 0.25, -0.75, 2.0], 2, 3);
        let y = Matrix::from_vec(vec![1.0, 0.0, 1.0], 1, 3);
        let params = Parameters::init(&[2, 20, 3, 1], 42);
        (x, y, params)
    }

    #[test]
    fn gradient_shapes_mirror_parameters() {
        let (x, y, params) = toy_problem();
        let (_, cache) = forward(&x, &params);
        let grads = backward(&x, &y, &params, &cache, 0.0);

        assert_eq!(grads.num_layers(), params.num_layers());
        for l in 0..params.num_layers() {
            assert_eq!(grads.layer(l).d_weight.shape(), params.layer(l).weight.shape());
            assert_eq!(grads.layer(l).d_bias.shape(), params.layer(l).bias.shape());
        }
    }

    #[test]
    fn l2_term_added_to_weight_gradients() {
        let (x, y, params) = toy_problem();
        let (_, cache) = forward(&x, &params);
        let plain = backward(&x, &y, &params, &cache, 0.0);
        let l2 = backward(&x, &y, &params, &cache, 0.7);

        let m = x.cols() as f32;
        for l in 0..params.num_layers() {
            // dW_l2 - dW_plain == (lambda / m) * W
            let w = &params.layer(l).weight;
            for i in 0..w.rows() {
                for j in 0..w.cols() {
                    let diff = l2.layer(l).d_weight.get(i, j) - plain.layer(l).d_weight.get(i, j);
                    let expected = 0.7 / m * w.get(i, j);
                    assert!((diff - expected).abs() < 1e-6);
                }
            }
            // Biases are not penalized
            assert_eq!(l2.layer(l).d_bias, plain.layer(l).d_bias);
        }
    }

    #[test]
    fn masked_units_contribute_zero_gradient() {
        let (x, y, params) = toy_problem();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let (_, cache) = forward_with_dropout(&x, &params, 0.5, &mut rng);
        let grads = backward(&x, &y, &params, &cache, 0.0);

        // A hidden unit masked in every sample receives zero error, so the
        // weight rows feeding it have zero gradient.
        for l in 0..2 {
            let mask = cache.keep_mask(l).expect("hidden layers are masked");
            for unit in 0..mask.rows() {
                let fully_masked = mask.row_slice(unit).iter().all(|&m| m == 0.0);
                if fully_masked {
                    assert!(grads
                        .layer(l)
                        .d_weight
                        .row_slice(unit)
                        .iter()
                        .all(|&g| g == 0.0));
                    assert_eq!(grads.layer(l).d_bias.get(unit, 0), 0.0);
                }
            }
        }
    }

    #[test]
    fn output_error_is_prediction_minus_label() {
        // Single linear-to-sigmoid layer: dW = (1/m) (a - y) xᵀ exactly.
        let x = Matrix::from_vec(vec![1.0, -1.0], 1, 2);
        let y = Matrix::from_vec(vec![1.0, 0.0], 1, 2);
        let params = Parameters::init(&[1, 1], 3);
        let (a, cache) = forward(&x, &params);
        let grads = backward(&x, &y, &params, &cache, 0.0);

        let expected = ((a.get(0, 0) - 1.0) * 1.0 + (a.get(0, 1) - 0.0) * -1.0) / 2.0;
        assert!((grads.layer(0).d_weight.get(0, 0) - expected).abs() < 1e-6);
    }
}
