//! The in-memory dataset container.

use crate::linalg::Matrix;

use super::DatasetError;

/// A labeled dataset in training layout.
///
/// Features are stored with one *column* per sample (shape
/// `(num_features, num_samples)`), which is the orientation the forward and
/// backward passes consume directly. Labels are a `(1, num_samples)` row
/// with binary entries.
///
/// # Example
///
/// ```
/// use mlp_rs::data::Dataset;
/// use mlp_rs::linalg::Matrix;
///
/// let features = Matrix::from_vec(vec![0.0, 1.0, 0.0, 1.0], 2, 2);
/// let labels = Matrix::from_vec(vec![0.0, 1.0], 1, 2);
/// let dataset = Dataset::new(features, labels).unwrap();
/// assert_eq!(dataset.num_samples(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Matrix,
    labels: Matrix,
}

impl Dataset {
    /// Create a dataset, validating the feature/label shapes.
    ///
    /// Label *values* are not validated: non-binary entries propagate into
    /// the numeric path as ordinary numbers.
    pub fn new(features: Matrix, labels: Matrix) -> Result<Self, DatasetError> {
        if features.cols() == 0 || features.rows() == 0 {
            return Err(DatasetError::Empty);
        }
        if labels.rows() != 1 || labels.cols() != features.cols() {
            return Err(DatasetError::SampleCountMismatch {
                labels: labels.rows() * labels.cols(),
                samples: features.cols(),
            });
        }
        Ok(Self { features, labels })
    }

    /// Build a dataset from row-per-sample records.
    ///
    /// `samples[i]` holds the feature vector of sample `i`; the stored
    /// feature matrix is its column-per-sample transpose.
    pub fn from_samples(samples: &[Vec<f32>], labels: &[f32]) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        if labels.len() != samples.len() {
            return Err(DatasetError::SampleCountMismatch {
                labels: labels.len(),
                samples: samples.len(),
            });
        }
        let num_features = samples[0].len();
        for (i, sample) in samples.iter().enumerate() {
            if sample.len() != num_features {
                return Err(DatasetError::FeatureCountMismatch {
                    sample: i,
                    expected: num_features,
                    got: sample.len(),
                });
            }
        }
        let features = Matrix::from_fn(num_features, samples.len(), |f, s| samples[s][f]);
        let labels = Matrix::from_vec(labels.to_vec(), 1, samples.len());
        Self::new(features, labels)
    }

    /// Feature matrix, `(num_features, num_samples)`.
    #[inline]
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    /// Label row, `(1, num_samples)`.
    #[inline]
    pub fn labels(&self) -> &Matrix {
        &self.labels
    }

    /// Labels as a flat slice, one entry per sample.
    #[inline]
    pub fn labels_slice(&self) -> &[f32] {
        self.labels.as_slice()
    }

    /// Number of features per sample.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.rows()
    }

    /// Number of samples.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.features.cols()
    }

    /// The feature vector of one sample.
    ///
    /// # Panics
    ///
    /// Panics if `sample >= self.num_samples()`.
    pub fn sample(&self, sample: usize) -> Vec<f32> {
        assert!(sample < self.num_samples(), "sample index out of bounds");
        (0..self.num_features())
            .map(|f| self.features.get(f, sample))
            .collect()
    }
}
