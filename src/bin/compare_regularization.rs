//! Regularization comparison harness.
//!
//! Trains the fixed-topology network three times on the same dataset:
//! without regularization, with an L2 penalty (lambda = 0.7), and with
//! inverted dropout (keep_prob = 0.86). Reports train/test accuracy and
//! writes the cost-curve and decision-boundary artifacts per model.
//!
//! Usage:
//!   `cargo run --bin compare_regularization --release [dataset.json] [out_dir]`
//!
//! Without a dataset argument, a seeded two-arcs dataset is generated.

use std::path::{Path, PathBuf};
use std::process;

use mlp_rs::data::{io, synthetic, Dataset};
use mlp_rs::predict;
use mlp_rs::report;
use mlp_rs::training::{MlpTrainer, Regularization, TrainerParams};

const DATA_SEED: u64 = 1;
const TEST_FRACTION: f32 = 0.25;

fn main() {
    let mut args = std::env::args().skip(1);
    let dataset_path: Option<PathBuf> = args.next().map(PathBuf::from);
    let out_dir: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| ".".into());

    let full = match dataset_path {
        Some(path) => io::load_dataset(&path).unwrap_or_else(|e| {
            eprintln!("failed to load {}: {e}", path.display());
            process::exit(1);
        }),
        None => synthetic::two_arcs(300, 0.1, DATA_SEED),
    };
    let (train, test) = synthetic::train_test_split(&full, TEST_FRACTION, DATA_SEED);

    run_model(
        "_without_regularization",
        "Model without regularization",
        Regularization::None,
        &train,
        &test,
        &out_dir,
    );
    run_model(
        "_with_L2-regularization",
        "Model with L2-regularization",
        Regularization::l2(0.7),
        &train,
        &test,
        &out_dir,
    );
    run_model(
        "_with_dropout",
        "Model with dropout",
        Regularization::dropout(0.86),
        &train,
        &test,
        &out_dir,
    );
}

fn run_model(
    model_label: &str,
    title: &str,
    regularization: Regularization,
    train: &Dataset,
    test: &Dataset,
    out_dir: &Path,
) {
    let params = TrainerParams {
        regularization,
        ..Default::default()
    };
    let learning_rate = params.learning_rate;

    println!("=== {title} ===");
    let result = MlpTrainer::new(params).train(train);

    println!(
        "On the training set: accuracy = {:.4}",
        predict::evaluate(&result.parameters, train)
    );
    println!(
        "On the test set: accuracy = {:.4}",
        predict::evaluate(&result.parameters, test)
    );

    let curve = report::plot_cost_curve(&result.cost_history, model_label, learning_rate, out_dir)
        .unwrap_or_else(|e| {
            eprintln!("failed to write cost curve: {e}");
            process::exit(1);
        });
    println!("wrote {}", curve.display());

    let boundary = report::plot_decision_boundary(
        predict::decision_fn(&result.parameters),
        train,
        title,
        model_label,
        out_dir,
    )
    .unwrap_or_else(|e| {
        eprintln!("failed to write decision boundary: {e}");
        process::exit(1);
    });
    println!("wrote {}", boundary.display());
    println!();
}
