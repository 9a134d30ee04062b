//! Training infrastructure for the feed-forward network.
//!
//! This module provides the types the training loop is built from:
//!
//! - [`Regularization`]: tagged configuration for the none/L2/dropout modes
//! - [`training_cost`] / [`binary_cross_entropy`]: the optimized objective
//! - [`MlpTrainer`] / [`TrainerParams`]: the full-batch gradient descent loop
//! - [`TrainingLogger`] / [`Verbosity`]: structured progress output
//! - [`Metric`] with [`Accuracy`] and [`LogLoss`] for evaluation

mod cost;
mod logger;
mod metric;
mod regularization;
mod trainer;

pub use cost::{binary_cross_entropy, l2_penalty, training_cost};
pub use logger::{TrainingLogger, Verbosity};
pub use metric::{Accuracy, LogLoss, Metric};
pub use regularization::Regularization;
pub use trainer::{MlpTrainer, TrainResult, TrainerParams};
