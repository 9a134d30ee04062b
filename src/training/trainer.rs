//! Full-batch gradient descent trainer.
//!
//! The trainer owns the whole loop: parameter initialization, repeated
//! (forward, cost, backward, update) steps, periodic cost recording, and
//! hand-over of the final parameters. Rendering of the recorded cost
//! history belongs to [`crate::report`], not the trainer.
//!
//! # Example
//!
//! ```
//! use mlp_rs::data::synthetic;
//! use mlp_rs::training::{MlpTrainer, Regularization, TrainerParams, Verbosity};
//!
//! let dataset = synthetic::two_arcs(64, 0.05, 7);
//! let params = TrainerParams {
//!     n_iterations: 200,
//!     regularization: Regularization::l2(0.7),
//!     verbosity: Verbosity::Silent,
//!     ..Default::default()
//! };
//!
//! let result = MlpTrainer::new(params).train(&dataset);
//! assert!(!result.cost_history.is_empty());
//! ```

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::Dataset;
use crate::network::{backward, forward, forward_with_dropout, Parameters, HIDDEN_UNITS};

use super::cost::training_cost;
use super::logger::{TrainingLogger, Verbosity};
use super::regularization::Regularization;

// ============================================================================
// TrainerParams
// ============================================================================

/// Parameters for the gradient descent trainer.
///
/// Use struct construction with `..Default::default()` for convenient
/// configuration.
///
/// # Example
///
/// ```
/// use mlp_rs::training::{Regularization, TrainerParams};
///
/// let params = TrainerParams {
///     learning_rate: 0.1,
///     n_iterations: 5_000,
///     regularization: Regularization::dropout(0.86),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TrainerParams {
    /// Hidden and output layer widths. The input width is taken from the
    /// dataset; the final entry must be 1 (the sigmoid output unit).
    pub layer_units: Vec<usize>,

    /// Learning rate for the vanilla gradient descent update.
    pub learning_rate: f32,

    /// Number of full-batch iterations.
    pub n_iterations: u32,

    /// Regularization mode (none, L2, or dropout).
    pub regularization: Regularization,

    /// Seed for parameter initialization and dropout mask sampling.
    pub seed: u64,

    /// Record the cost into the history every this many iterations.
    pub cost_interval: u32,

    /// Emit a progress line every this many iterations (at `Info`).
    pub print_interval: u32,

    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            layer_units: HIDDEN_UNITS.to_vec(),
            learning_rate: 0.3,
            n_iterations: 30_000,
            regularization: Regularization::None,
            seed: 42,
            cost_interval: 1_000,
            print_interval: 10_000,
            verbosity: Verbosity::default(),
        }
    }
}

// ============================================================================
// TrainResult
// ============================================================================

/// Outcome of a training run.
///
/// The parameters are handed to the caller by value; the cost history holds
/// one entry per `cost_interval` iterations (starting at iteration 0) for
/// the reporting layer to render.
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Final parameters after all updates.
    pub parameters: Parameters,
    /// Recorded training costs, one per `cost_interval` iterations.
    pub cost_history: Vec<f64>,
}

// ============================================================================
// MlpTrainer
// ============================================================================

/// Full-batch gradient descent trainer for the fixed-topology network.
///
/// Each iteration runs the forward pass (with freshly sampled dropout masks
/// when dropout is active), computes the cross-entropy cost (plus the L2
/// penalty when active), backpropagates hand-derived gradients, and applies
/// a vanilla gradient descent update.
pub struct MlpTrainer {
    params: TrainerParams,
}

impl MlpTrainer {
    /// Create a new trainer.
    pub fn new(params: TrainerParams) -> Self {
        Self { params }
    }

    /// The trainer's configuration.
    pub fn params(&self) -> &TrainerParams {
        &self.params
    }

    /// Train on the given dataset and return the final parameters together
    /// with the recorded cost history.
    ///
    /// Deterministic given `params.seed` and the dataset. Non-finite costs
    /// or gradients are not detected: they propagate through the recorded
    /// history and the parameters as ordinary floats.
    ///
    /// # Panics
    ///
    /// Panics if `layer_units` is empty or does not end in a single output
    /// unit, or if the dataset shapes are inconsistent with the topology.
    pub fn train(&self, train: &Dataset) -> TrainResult {
        let p = &self.params;
        assert!(!p.layer_units.is_empty(), "layer_units must not be empty");
        assert_eq!(
            *p.layer_units.last().expect("checked non-empty"),
            1,
            "the output layer must have exactly 1 unit, got {:?}",
            p.layer_units
        );

        let x = train.features();
        let y = train.labels();

        let mut layer_dims = Vec::with_capacity(p.layer_units.len() + 1);
        layer_dims.push(train.num_features());
        layer_dims.extend_from_slice(&p.layer_units);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(p.seed);
        let mut parameters = Parameters::init_with_rng(&layer_dims, &mut rng);

        let l2_lambda = p.regularization.l2_lambda();
        let keep_prob = p.regularization.keep_prob();

        let logger = TrainingLogger::new(p.verbosity);
        logger.start_training(p.n_iterations, train.num_samples());

        let mut cost_history = Vec::new();
        let mut cost = f64::NAN;
        for i in 0..p.n_iterations {
            let (output, cache) = match keep_prob {
                Some(kp) => forward_with_dropout(x, &parameters, kp, &mut rng),
                None => forward(x, &parameters),
            };

            cost = training_cost(&output, y, &parameters, &p.regularization);

            let gradients = backward(x, y, &parameters, &cache, l2_lambda);
            parameters.apply_gradients(&gradients, p.learning_rate);

            if p.print_interval > 0 && i % p.print_interval == 0 {
                logger.log_cost(i, cost);
            }
            if p.cost_interval > 0 && i % p.cost_interval == 0 {
                cost_history.push(cost);
            }
        }

        logger.finish_training(p.n_iterations, cost);

        TrainResult {
            parameters,
            cost_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data::synthetic;
    use crate::training::binary_cross_entropy;

    use super::*;

    fn quiet(n_iterations: u32, regularization: Regularization) -> TrainerParams {
        TrainerParams {
            n_iterations,
            regularization,
            verbosity: Verbosity::Silent,
            ..Default::default()
        }
    }

    #[test]
    fn params_default_matches_reference_configuration() {
        let params = TrainerParams::default();
        assert_eq!(params.layer_units, vec![20, 3, 1]);
        assert_eq!(params.learning_rate, 0.3);
        assert_eq!(params.n_iterations, 30_000);
        assert_eq!(params.regularization, Regularization::None);
        assert_eq!(params.cost_interval, 1_000);
        assert_eq!(params.print_interval, 10_000);
    }

    #[test]
    fn zero_iterations_returns_initialized_parameters() {
        let dataset = synthetic::linearly_separable(20, 3);
        let params = quiet(0, Regularization::None);
        let seed = params.seed;
        let result = MlpTrainer::new(params).train(&dataset);

        let expected = Parameters::init(&[2, 20, 3, 1], seed);
        assert_eq!(result.parameters, expected);
        assert!(result.cost_history.is_empty());
    }

    #[test]
    fn cost_decreases_on_separable_data() {
        let dataset = synthetic::linearly_separable(40, 5);
        let result = MlpTrainer::new(quiet(100, Regularization::None)).train(&dataset);

        // Recompute initial and final cost from scratch
        let initial = result.cost_history[0];
        let (output, _) = forward(dataset.features(), &result.parameters);
        let final_cost = binary_cross_entropy(&output, dataset.labels());
        assert!(
            final_cost < initial,
            "cost did not decrease: {initial} -> {final_cost}"
        );
    }

    #[test]
    fn cost_history_interval() {
        let dataset = synthetic::linearly_separable(20, 3);
        let params = TrainerParams {
            n_iterations: 2_500,
            cost_interval: 1_000,
            ..quiet(0, Regularization::None)
        };
        let result = MlpTrainer::new(params).train(&dataset);
        // Recorded at iterations 0, 1000, 2000
        assert_eq!(result.cost_history.len(), 3);
    }

    #[test]
    fn training_is_deterministic_given_seed() {
        let dataset = synthetic::two_arcs(60, 0.05, 2);
        let a = MlpTrainer::new(quiet(50, Regularization::dropout(0.86))).train(&dataset);
        let b = MlpTrainer::new(quiet(50, Regularization::dropout(0.86))).train(&dataset);

        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn parameter_shapes_survive_training() {
        let dataset = synthetic::two_arcs(40, 0.05, 2);
        let result = MlpTrainer::new(quiet(30, Regularization::l2(0.7))).train(&dataset);

        let dims = [2usize, 20, 3, 1];
        for (l, pair) in dims.windows(2).enumerate() {
            let layer = result.parameters.layer(l);
            assert_eq!(layer.weight.shape(), (pair[1], pair[0]));
            assert_eq!(layer.bias.shape(), (pair[1], 1));
        }
    }

    #[test]
    fn l2_shrinks_weights() {
        let dataset = synthetic::two_arcs(60, 0.05, 2);
        let plain = MlpTrainer::new(quiet(500, Regularization::None)).train(&dataset);
        let l2 = MlpTrainer::new(quiet(500, Regularization::l2(5.0))).train(&dataset);

        assert!(
            l2.parameters.weights_norm_squared() < plain.parameters.weights_norm_squared(),
            "L2 should shrink the weight norm"
        );
    }

    #[test]
    #[should_panic(expected = "output layer must have exactly 1 unit")]
    fn rejects_multi_unit_output() {
        let dataset = synthetic::linearly_separable(10, 1);
        let params = TrainerParams {
            layer_units: vec![20, 3, 2],
            ..quiet(10, Regularization::None)
        };
        let _ = MlpTrainer::new(params).train(&dataset);
    }
}
