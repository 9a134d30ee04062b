//! JSON dataset loading.
//!
//! The on-disk format is a row-per-sample record:
//!
//! ```json
//! {
//!   "features": [[0.1, -0.2], [0.3, 0.5]],
//!   "labels": [0.0, 1.0]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Dataset, DatasetError};

/// On-disk dataset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Feature rows, one per sample.
    pub features: Vec<Vec<f32>>,
    /// Labels, one per sample.
    pub labels: Vec<f32>,
}

impl DatasetRecord {
    /// Convert into the column-per-sample training layout.
    pub fn into_dataset(self) -> Result<Dataset, DatasetError> {
        Dataset::from_samples(&self.features, &self.labels)
    }
}

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    let record: DatasetRecord = serde_json::from_reader(BufReader::new(file))?;
    record.into_dataset()
}
