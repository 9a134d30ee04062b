//! Network parameters and their initialization.

use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::linalg::Matrix;

use super::Gradients;

/// Hidden and output layer widths of the fixed topology.
///
/// The full layer dimension list is the input dimension followed by these
/// entries; the final `1` is the sigmoid output unit.
pub const HIDDEN_UNITS: [usize; 3] = [20, 3, 1];

/// One layer's weight matrix and bias column.
///
/// For a layer mapping `n_in` units to `n_out` units, `weight` is
/// `(n_out, n_in)` and `bias` is `(n_out, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerParams {
    pub weight: Matrix,
    pub bias: Matrix,
}

/// All trainable parameters of the network.
///
/// Created once at training start by [`Parameters::init`], mutated in place
/// once per iteration by [`Parameters::apply_gradients`], and handed to the
/// caller when training finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    layers: Vec<LayerParams>,
}

impl Parameters {
    /// Initialize parameters for the given layer dimensions.
    ///
    /// Weights are drawn as `N(0, 1) / sqrt(fan_in)`, biases start at zero.
    /// The same `(layer_dims, seed)` pair always produces the same
    /// parameters.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two dimensions are given or any dimension is
    /// zero.
    pub fn init(layer_dims: &[usize], seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self::init_with_rng(layer_dims, &mut rng)
    }

    /// Initialize parameters drawing from the caller's RNG.
    ///
    /// # Panics
    ///
    /// Same contract as [`Parameters::init`].
    pub fn init_with_rng<R: Rng>(layer_dims: &[usize], rng: &mut R) -> Self {
        assert!(
            layer_dims.len() >= 2,
            "need an input and at least one layer, got dims {:?}",
            layer_dims
        );
        assert!(
            layer_dims.iter().all(|&d| d > 0),
            "layer dimensions must be non-zero, got {:?}",
            layer_dims
        );

        let layers = layer_dims
            .windows(2)
            .map(|pair| {
                let (n_in, n_out) = (pair[0], pair[1]);
                let scale = 1.0 / (n_in as f32).sqrt();
                let weight = Matrix::from_fn(n_out, n_in, |_, _| {
                    let z: f32 = rng.sample(StandardNormal);
                    z * scale
                });
                LayerParams {
                    weight,
                    bias: Matrix::zeros(n_out, 1),
                }
            })
            .collect();

        Self { layers }
    }

    /// Number of layers (affine steps), excluding the input.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Parameters of one layer.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= self.num_layers()`.
    #[inline]
    pub fn layer(&self, layer: usize) -> &LayerParams {
        &self.layers[layer]
    }

    /// All layers in order.
    #[inline]
    pub fn layers(&self) -> &[LayerParams] {
        &self.layers
    }

    /// Input dimension the network expects.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.layers[0].weight.cols()
    }

    /// Output dimension the network produces.
    #[inline]
    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].weight.rows()
    }

    /// Vanilla gradient descent step: `param -= learning_rate * grad`.
    ///
    /// # Panics
    ///
    /// Panics if the gradient shapes do not mirror the parameter shapes.
    pub fn apply_gradients(&mut self, gradients: &Gradients, learning_rate: f32) {
        assert_eq!(
            self.layers.len(),
            gradients.num_layers(),
            "gradient layer count {} does not match parameter layer count {}",
            gradients.num_layers(),
            self.layers.len()
        );
        for (layer, grad) in self.layers.iter_mut().zip(gradients.layers()) {
            layer.weight.sub_scaled_assign(&grad.d_weight, learning_rate);
            layer.bias.sub_scaled_assign(&grad.d_bias, learning_rate);
        }
    }

    /// Sum of squared Frobenius norms over all weight matrices.
    ///
    /// Biases are not penalized.
    pub fn weights_norm_squared(&self) -> f64 {
        self.layers
            .iter()
            .map(|l| l.weight.frobenius_norm_squared())
            .sum()
    }

    pub(crate) fn layer_mut(&mut self, layer: usize) -> &mut LayerParams {
        &mut self.layers[layer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_shapes_follow_dims() {
        let params = Parameters::init(&[2, 20, 3, 1], 42);
        assert_eq!(params.num_layers(), 3);
        assert_eq!(params.layer(0).weight.shape(), (20, 2));
        assert_eq!(params.layer(0).bias.shape(), (20, 1));
        assert_eq!(params.layer(1).weight.shape(), (3, 20));
        assert_eq!(params.layer(2).weight.shape(), (1, 3));
        assert_eq!(params.input_dim(), 2);
        assert_eq!(params.output_dim(), 1);
    }

    #[test]
    fn init_is_deterministic() {
        let a = Parameters::init(&[2, 20, 3, 1], 42);
        let b = Parameters::init(&[2, 20, 3, 1], 42);
        assert_eq!(a, b);

        let c = Parameters::init(&[2, 20, 3, 1], 43);
        assert_ne!(a, c);
    }

    #[test]
    fn init_biases_are_zero() {
        let params = Parameters::init(&[4, 20, 3, 1], 1);
        for layer in params.layers() {
            assert!(layer.bias.as_slice().iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    fn init_scale_shrinks_with_fan_in() {
        // With fan-in f, weights are N(0, 1/f); the empirical variance of a
        // 20x400 draw should be near 1/400.
        let params = Parameters::init(&[400, 20], 7);
        let w = &params.layer(0).weight;
        let var: f64 = w.as_slice().iter().map(|&v| (v as f64).powi(2)).sum::<f64>()
            / w.as_slice().len() as f64;
        assert!((var - 1.0 / 400.0).abs() < 1.0 / 400.0);
    }

    #[test]
    #[should_panic(expected = "at least one layer")]
    fn init_rejects_single_dim() {
        let _ = Parameters::init(&[3], 0);
    }
}
