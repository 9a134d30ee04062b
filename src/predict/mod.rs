//! Prediction on trained parameters.
//!
//! Consumed after training: probability outputs, hard 0/1 predictions,
//! accuracy measurement, and a 2-D decision closure for boundary rendering.
//! Dropout is never applied at prediction time.

use crate::data::Dataset;
use crate::linalg::Matrix;
use crate::network::{forward, Parameters};
use crate::training::{Accuracy, Metric};

/// Probability outputs for the given inputs, shape `(1, num_samples)`.
///
/// # Panics
///
/// Panics if `x.rows()` does not match the network's input dimension.
pub fn predict_proba(params: &Parameters, x: &Matrix) -> Matrix {
    let (output, _) = forward(x, params);
    output
}

/// Hard 0/1 predictions at threshold 0.5.
///
/// # Panics
///
/// Panics if `x.rows()` does not match the network's input dimension.
pub fn predict(params: &Parameters, x: &Matrix) -> Matrix {
    predict_proba(params, x).map(|p| if p >= 0.5 { 1.0 } else { 0.0 })
}

/// Accuracy of the parameters against a labeled dataset.
pub fn evaluate(params: &Parameters, dataset: &Dataset) -> f64 {
    let proba = predict_proba(params, dataset.features());
    Accuracy::default().compute(proba.as_slice(), dataset.labels_slice())
}

/// A decision function over 2-D points, for boundary rendering.
///
/// Returns the hard class (0.0 or 1.0) at each `(x, y)` point.
///
/// # Panics
///
/// Panics if the network's input dimension is not 2 (here, or on first
/// call).
pub fn decision_fn(params: &Parameters) -> impl Fn(f32, f32) -> f32 + '_ {
    assert_eq!(
        params.input_dim(),
        2,
        "decision boundaries are rendered for 2-D inputs, network expects {}",
        params.input_dim()
    );
    move |px, py| {
        let point = Matrix::from_vec(vec![px, py], 2, 1);
        predict(params, &point).get(0, 0)
    }
}
