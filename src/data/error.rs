//! Shared error types for dataset construction and I/O.

use std::io;

/// Errors that can occur when building or loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset is empty")]
    Empty,

    #[error("label count {labels} does not match sample count {samples}")]
    SampleCountMismatch { labels: usize, samples: usize },

    #[error("sample {sample} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        sample: usize,
        expected: usize,
        got: usize,
    },
}
