//! Evaluation metrics for model quality.
//!
//! Metrics are separate from the training cost — the model is optimized on
//! cross-entropy but reported on accuracy (and, when monitoring, a clipped
//! log loss).

/// A metric for evaluating model quality.
///
/// `compute` takes predictions and ground-truth labels and returns a scalar
/// score; `higher_is_better` gives the direction.
pub trait Metric {
    /// Compute the metric value.
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64;

    /// Whether higher values indicate better performance.
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Accuracy
// =============================================================================

/// Classification accuracy: proportion of correct predictions.
///
/// Higher is better. Probabilities are thresholded at `threshold`
/// (default 0.5).
#[derive(Debug, Clone, Copy)]
pub struct Accuracy {
    /// Threshold for the positive class.
    pub threshold: f32,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Accuracy {
    /// Create an accuracy metric with a custom threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Metric for Accuracy {
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64 {
        debug_assert_eq!(preds.len(), labels.len());

        if preds.is_empty() {
            return 0.0;
        }

        let correct = preds
            .iter()
            .zip(labels.iter())
            .filter(|(p, l)| {
                let pred_class = if **p >= self.threshold { 1.0 } else { 0.0 };
                (pred_class - **l).abs() < 0.5
            })
            .count();

        correct as f64 / preds.len() as f64
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}

// =============================================================================
// LogLoss (Binary Cross-Entropy, clipped)
// =============================================================================

/// Binary cross-entropy: -mean(y·log(p) + (1-y)·log(1-p))
///
/// Lower is better. Expects predictions to be probabilities in (0, 1);
/// clips to avoid log(0), unlike the unclipped training objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoss;

impl Metric for LogLoss {
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64 {
        debug_assert_eq!(preds.len(), labels.len());

        if preds.is_empty() {
            return 0.0;
        }

        let eps = 1e-15f64;

        preds
            .iter()
            .zip(labels.iter())
            .map(|(p, l)| {
                let p = (*p as f64).clamp(eps, 1.0 - eps);
                let l = *l as f64;
                -(l * p.ln() + (1.0 - l) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / preds.len() as f64
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "logloss"
    }
}
