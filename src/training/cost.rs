//! Cost computation for the training objective.

use crate::linalg::Matrix;
use crate::network::Parameters;

use super::Regularization;

/// Binary cross-entropy, averaged over samples.
///
/// `-(1/m) Σ [y·ln(a) + (1-y)·ln(1-a)]`, accumulated in `f64`. Outputs are
/// not clipped: an exact 0 or 1 against the opposite label yields an
/// infinite cost, and non-finite activations propagate as-is (the
/// monitoring [`super::LogLoss`] metric clips; the training objective does
/// not).
///
/// # Panics
///
/// Panics if `output` and `labels` shapes differ.
pub fn binary_cross_entropy(output: &Matrix, labels: &Matrix) -> f64 {
    assert_eq!(
        output.shape(),
        labels.shape(),
        "output shape {:?} does not match label shape {:?}",
        output.shape(),
        labels.shape()
    );
    let m = output.cols() as f64;
    let total: f64 = output
        .as_slice()
        .iter()
        .zip(labels.as_slice())
        .map(|(&a, &y)| {
            let (a, y) = (a as f64, y as f64);
            y * a.ln() + (1.0 - y) * (1.0 - a).ln()
        })
        .sum();
    -total / m
}

/// The L2 penalty term: `(lambda / (2m)) · Σ‖W‖_F²` over all weight
/// matrices.
pub fn l2_penalty(params: &Parameters, lambda: f32, num_samples: usize) -> f64 {
    (lambda as f64) / (2.0 * num_samples as f64) * params.weights_norm_squared()
}

/// The full training cost: cross-entropy plus the L2 penalty when active.
///
/// Dropout does not change the cost expression; its effect enters through
/// the masked activations in `output`.
pub fn training_cost(
    output: &Matrix,
    labels: &Matrix,
    params: &Parameters,
    regularization: &Regularization,
) -> f64 {
    let cost = binary_cross_entropy(output, labels);
    match regularization {
        Regularization::L2 { lambda } => cost + l2_penalty(params, *lambda, labels.cols()),
        _ => cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_entropy_known_value() {
        // Predictions of 0.5 everywhere: cost is ln(2)
        let output = Matrix::from_vec(vec![0.5, 0.5], 1, 2);
        let labels = Matrix::from_vec(vec![1.0, 0.0], 1, 2);
        let cost = binary_cross_entropy(&output, &labels);
        assert!((cost - std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn cross_entropy_rewards_confidence() {
        let labels = Matrix::from_vec(vec![1.0, 0.0], 1, 2);
        let good = Matrix::from_vec(vec![0.99, 0.01], 1, 2);
        let bad = Matrix::from_vec(vec![0.6, 0.4], 1, 2);
        assert!(
            binary_cross_entropy(&good, &labels) < binary_cross_entropy(&bad, &labels)
        );
    }

    #[test]
    fn cross_entropy_is_infinite_at_certain_mistake() {
        let output = Matrix::from_vec(vec![1.0], 1, 1);
        let labels = Matrix::from_vec(vec![0.0], 1, 1);
        assert!(binary_cross_entropy(&output, &labels).is_infinite());
    }

    #[test]
    fn l2_penalty_closed_form() {
        let params = crate::network::Parameters::init(&[2, 20, 3, 1], 42);
        let lambda = 0.7f32;
        let m = 10usize;
        let expected = lambda as f64 / (2.0 * m as f64) * params.weights_norm_squared();
        assert!((l2_penalty(&params, lambda, m) - expected).abs() < 1e-12);
    }

    #[test]
    fn training_cost_adds_penalty_only_under_l2() {
        let params = crate::network::Parameters::init(&[2, 20, 3, 1], 42);
        let output = Matrix::from_vec(vec![0.5, 0.5], 1, 2);
        let labels = Matrix::from_vec(vec![1.0, 0.0], 1, 2);

        let base = training_cost(&output, &labels, &params, &Regularization::None);
        let l2 = training_cost(&output, &labels, &params, &Regularization::l2(0.7));
        let dropout = training_cost(
            &output,
            &labels,
            &params,
            &Regularization::dropout(0.86),
        );

        assert!((base - binary_cross_entropy(&output, &labels)).abs() < 1e-12);
        assert!((l2 - base - l2_penalty(&params, 0.7, 2)).abs() < 1e-12);
        assert!((dropout - base).abs() < 1e-12);
    }
}
