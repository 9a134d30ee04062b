//! Regularization configuration.

/// Regularization mode for a training run.
///
/// Exactly one mode is active per run; combining the L2 penalty with
/// dropout is unrepresentable by construction. Use
/// [`Regularization::from_hyperparams`] when starting from the raw
/// `(lambda, keep_prob)` hyperparameter pair.
///
/// # Example
///
/// ```
/// use mlp_rs::training::Regularization;
///
/// let none = Regularization::from_hyperparams(0.0, 1.0);
/// assert_eq!(none, Regularization::None);
///
/// let l2 = Regularization::l2(0.7);
/// assert_eq!(l2.l2_lambda(), 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Regularization {
    /// No regularization.
    #[default]
    None,

    /// L2 weight penalty with strength `lambda`.
    L2 { lambda: f32 },

    /// Inverted dropout keeping each hidden unit with probability
    /// `keep_prob`.
    Dropout { keep_prob: f32 },
}

impl Regularization {
    /// L2 penalty with the given strength.
    ///
    /// # Panics
    ///
    /// Panics unless `lambda > 0` and finite.
    pub fn l2(lambda: f32) -> Self {
        assert!(
            lambda > 0.0 && lambda.is_finite(),
            "L2 lambda must be positive and finite, got {lambda}"
        );
        Self::L2 { lambda }
    }

    /// Inverted dropout with the given keep probability.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < keep_prob < 1`. A keep probability of 1 is the
    /// degenerate no-dropout case; use [`Regularization::None`] for it.
    pub fn dropout(keep_prob: f32) -> Self {
        assert!(
            keep_prob > 0.0 && keep_prob < 1.0,
            "keep_prob must be in (0, 1), got {keep_prob}"
        );
        Self::Dropout { keep_prob }
    }

    /// Build from the raw `(lambda, keep_prob)` hyperparameter pair.
    ///
    /// `lambda == 0` disables L2, `keep_prob == 1` disables dropout.
    ///
    /// # Panics
    ///
    /// Panics if both regularizers would be active at once (the modes are
    /// mutually exclusive), or if either value is out of range.
    pub fn from_hyperparams(lambda: f32, keep_prob: f32) -> Self {
        assert!(
            lambda == 0.0 || keep_prob == 1.0,
            "L2 (lambda = {lambda}) and dropout (keep_prob = {keep_prob}) are mutually exclusive"
        );
        assert!(
            keep_prob > 0.0 && keep_prob <= 1.0,
            "keep_prob must be in (0, 1], got {keep_prob}"
        );
        if lambda != 0.0 {
            Self::l2(lambda)
        } else if keep_prob < 1.0 {
            Self::dropout(keep_prob)
        } else {
            Self::None
        }
    }

    /// The L2 strength, or `0.0` when L2 is not active.
    #[inline]
    pub fn l2_lambda(&self) -> f32 {
        match self {
            Self::L2 { lambda } => *lambda,
            _ => 0.0,
        }
    }

    /// The dropout keep probability, when dropout is active.
    #[inline]
    pub fn keep_prob(&self) -> Option<f32> {
        match self {
            Self::Dropout { keep_prob } => Some(*keep_prob),
            _ => None,
        }
    }

    /// Mode name (for logging and artifact labels).
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::L2 { .. } => "l2",
            Self::Dropout { .. } => "dropout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hyperparams_selects_mode() {
        assert_eq!(Regularization::from_hyperparams(0.0, 1.0), Regularization::None);
        assert_eq!(
            Regularization::from_hyperparams(0.7, 1.0),
            Regularization::L2 { lambda: 0.7 }
        );
        assert_eq!(
            Regularization::from_hyperparams(0.0, 0.86),
            Regularization::Dropout { keep_prob: 0.86 }
        );
    }

    #[test]
    #[should_panic(expected = "mutually exclusive")]
    fn from_hyperparams_rejects_joint_modes() {
        let _ = Regularization::from_hyperparams(0.5, 0.8);
    }

    #[test]
    #[should_panic(expected = "keep_prob must be in (0, 1)")]
    fn dropout_rejects_keep_all() {
        let _ = Regularization::dropout(1.0);
    }

    #[test]
    #[should_panic(expected = "lambda must be positive")]
    fn l2_rejects_zero() {
        let _ = Regularization::l2(0.0);
    }

    #[test]
    fn accessors() {
        assert_eq!(Regularization::l2(0.7).l2_lambda(), 0.7);
        assert_eq!(Regularization::l2(0.7).keep_prob(), None);
        assert_eq!(Regularization::dropout(0.86).keep_prob(), Some(0.86));
        assert_eq!(Regularization::dropout(0.86).l2_lambda(), 0.0);
        assert_eq!(Regularization::None.name(), "none");
        assert_eq!(Regularization::l2(1.0).name(), "l2");
        assert_eq!(Regularization::dropout(0.5).name(), "dropout");
    }
}
