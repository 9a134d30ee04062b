//! Deterministic synthetic datasets.
//!
//! All generators are seeded, so a given `(size, noise, seed)` triple always
//! produces the same dataset.

use rand::prelude::*;

use super::Dataset;

/// Generate the two-arcs (interleaved half-moons) dataset.
///
/// Two classes of 2-D points on interleaved arcs, perturbed with uniform
/// noise of the given amplitude. The arcs are not linearly separable, which
/// is what makes the regularization comparison visible in the decision
/// boundary.
///
/// # Panics
///
/// Panics if `num_samples < 4`.
pub fn two_arcs(num_samples: usize, noise: f32, seed: u64) -> Dataset {
    assert!(num_samples >= 4, "need at least 4 samples, got {num_samples}");
    let mut rng = StdRng::seed_from_u64(seed);

    let half = num_samples / 2;
    let mut samples = Vec::with_capacity(num_samples);
    let mut labels = Vec::with_capacity(num_samples);

    let noisy = |v: f32, rng: &mut StdRng| v + (rng.gen::<f32>() * 2.0 - 1.0) * noise;

    // Outer arc, class 0
    for i in 0..half {
        let t = std::f32::consts::PI * i as f32 / (half - 1) as f32;
        let x = noisy(t.cos(), &mut rng);
        let y = noisy(t.sin(), &mut rng);
        samples.push(vec![0.5 * x - 0.25, 0.5 * y - 0.15]);
        labels.push(0.0);
    }
    // Inner arc, class 1
    for i in 0..(num_samples - half) {
        let t = std::f32::consts::PI * i as f32 / (num_samples - half - 1) as f32;
        let x = noisy(1.0 - t.cos(), &mut rng);
        let y = noisy(0.5 - t.sin(), &mut rng);
        samples.push(vec![0.5 * x - 0.25, 0.5 * y - 0.15]);
        labels.push(1.0);
    }

    Dataset::from_samples(&samples, &labels).expect("generator produced consistent shapes")
}

/// Generate a linearly separable 2-D two-cluster dataset.
///
/// Class 0 is centered at `(-0.5, -0.5)` and class 1 at `(0.5, 0.5)`, each
/// with uniform jitter of amplitude `0.3`, so the line `x + y = 0` separates
/// the classes exactly.
///
/// # Panics
///
/// Panics if `num_samples == 0`.
pub fn linearly_separable(num_samples: usize, seed: u64) -> Dataset {
    assert!(num_samples > 0, "need at least 1 sample");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut samples = Vec::with_capacity(num_samples);
    let mut labels = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let label = (i % 2) as f32;
        let center = if label > 0.5 { 0.5 } else { -0.5 };
        let jitter_x = (rng.gen::<f32>() * 2.0 - 1.0) * 0.3;
        let jitter_y = (rng.gen::<f32>() * 2.0 - 1.0) * 0.3;
        samples.push(vec![center + jitter_x, center + jitter_y]);
        labels.push(label);
    }

    Dataset::from_samples(&samples, &labels).expect("generator produced consistent shapes")
}

/// Deterministic train/test split.
///
/// Shuffles sample indices with the given seed and carves off
/// `test_fraction` of them (rounded) as the test set.
///
/// # Panics
///
/// Panics if `test_fraction` is not in `(0, 1)` or either split would be
/// empty.
pub fn train_test_split(dataset: &Dataset, test_fraction: f32, seed: u64) -> (Dataset, Dataset) {
    assert!(
        test_fraction > 0.0 && test_fraction < 1.0,
        "test_fraction must be in (0, 1), got {test_fraction}"
    );
    let num_samples = dataset.num_samples();
    let mut idx: Vec<usize> = (0..num_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let test_len = ((num_samples as f32) * test_fraction).round() as usize;
    assert!(
        test_len > 0 && test_len < num_samples,
        "split would leave an empty set ({test_len} of {num_samples} samples in test)"
    );
    let (test_idx, train_idx) = idx.split_at(test_len);

    (subset(dataset, train_idx), subset(dataset, test_idx))
}

fn subset(dataset: &Dataset, indices: &[usize]) -> Dataset {
    let samples: Vec<Vec<f32>> = indices.iter().map(|&i| dataset.sample(i)).collect();
    let labels: Vec<f32> = indices
        .iter()
        .map(|&i| dataset.labels_slice()[i])
        .collect();
    Dataset::from_samples(&samples, &labels).expect("subset of a valid dataset is valid")
}
