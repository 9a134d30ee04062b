//! Rendering of training artifacts.
//!
//! Training itself only returns data (the cost history and the final
//! parameters); this module owns turning those into files. Two artifacts
//! are produced per model label, matching the reference tooling's naming
//! scheme: `cost<label>.svg` and `decision_boundary<label>.svg`.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::data::Dataset;

/// Errors that can occur while writing report artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Render the cost-vs-iteration curve to `cost<model_label>.svg`.
///
/// The x axis counts recorded entries (one per thousand iterations under
/// the default trainer configuration); the caption carries the learning
/// rate. Non-finite cost entries are left out of the plot, so a run that
/// diverged still renders its finite prefix.
///
/// Returns the path of the written file.
pub fn plot_cost_curve(
    costs: &[f64],
    model_label: &str,
    learning_rate: f32,
    out_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(format!("cost{model_label}.svg"));

    let points: Vec<(f64, f64)> = costs
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_finite())
        .map(|(i, &c)| (i as f64, c))
        .collect();

    let (mut y_min, mut y_max) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &(_, c)| (lo.min(c), hi.max(c)),
    );
    if !y_min.is_finite() || !y_max.is_finite() {
        (y_min, y_max) = (0.0, 1.0);
    }
    if y_min >= y_max {
        y_max = y_min + 1.0;
    }
    let x_max = costs.len().max(2) as f64 - 1.0;

    let root = SVGBackend::new(&path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Learning rate = {learning_rate}"),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("iterations (x1,000)")
        .y_desc("cost")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Render the decision boundary to `decision_boundary<model_label>.svg`.
///
/// Shades a grid over the data's padded bounding box by the decision
/// function's class at each cell, then scatters the dataset's points on
/// top (blue for label 1, red for label 0).
///
/// Returns the path of the written file.
///
/// # Panics
///
/// Panics if the dataset is not 2-D.
pub fn plot_decision_boundary<F>(
    decision: F,
    dataset: &Dataset,
    title: &str,
    model_label: &str,
    out_dir: &Path,
) -> Result<PathBuf, ReportError>
where
    F: Fn(f32, f32) -> f32,
{
    assert_eq!(
        dataset.num_features(),
        2,
        "decision boundaries are rendered for 2-D datasets, got {} features",
        dataset.num_features()
    );

    let path = out_dir.join(format!("decision_boundary{model_label}.svg"));

    let (x_min, x_max) = padded_bounds(dataset.features().row_slice(0));
    let (y_min, y_max) = padded_bounds(dataset.features().row_slice(1));

    let root = SVGBackend::new(&path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x1")
        .y_desc("x2")
        .draw()
        .map_err(render_err)?;

    // Class regions as a shaded grid
    const GRID: usize = 160;
    let dx = (x_max - x_min) / GRID as f32;
    let dy = (y_max - y_min) / GRID as f32;
    let positive = RGBColor(213, 226, 250);
    let negative = RGBColor(250, 221, 215);
    chart
        .draw_series((0..GRID).flat_map(|gx| {
            let decision = &decision;
            (0..GRID).map(move |gy| {
                let x0 = x_min + gx as f32 * dx;
                let y0 = y_min + gy as f32 * dy;
                let class = decision(x0 + dx / 2.0, y0 + dy / 2.0);
                let color = if class >= 0.5 { positive } else { negative };
                Rectangle::new([(x0, y0), (x0 + dx, y0 + dy)], color.filled())
            })
        }))
        .map_err(render_err)?;

    // Data points on top
    chart
        .draw_series((0..dataset.num_samples()).map(|i| {
            let point = dataset.sample(i);
            let color = if dataset.labels_slice()[i] >= 0.5 {
                BLUE
            } else {
                RED
            };
            Circle::new((point[0], point[1]), 3, color.filled())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    drop(chart);
    drop(root);
    Ok(path)
}

fn padded_bounds(values: &[f32]) -> (f32, f32) {
    let (lo, hi) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let pad = if hi > lo { (hi - lo) * 0.1 } else { 0.5 };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use crate::data::synthetic;

    use super::*;

    #[test]
    fn cost_curve_written_with_expected_name() {
        let dir = tempfile::tempdir().unwrap();
        let costs = vec![0.7, 0.5, 0.42, 0.4];
        let path =
            plot_cost_curve(&costs, "_without_regularization", 0.3, dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "cost_without_regularization.svg"
        );
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn cost_curve_tolerates_non_finite_entries() {
        let dir = tempfile::tempdir().unwrap();
        let costs = vec![0.7, f64::NAN, 0.5, f64::INFINITY];
        let path = plot_cost_curve(&costs, "_diverged", 0.3, dir.path()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn decision_boundary_written_with_expected_name() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = synthetic::two_arcs(40, 0.05, 1);
        let path = plot_decision_boundary(
            |x, y| if x + y > 0.0 { 1.0 } else { 0.0 },
            &dataset,
            "Model without regularization",
            "_without_regularization",
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "decision_boundary_without_regularization.svg"
        );
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
