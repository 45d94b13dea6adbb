use nalgebra::Point3;

use super::samples::samples_for_steps;
use crate::error::ParalineError;
use crate::params::{GenCfg, ParalineParams};

/// Solve the right triangle for each sample: `(b, −a, 0)` with
/// `b = (h² − a²) / (2h)`.
///
/// Pre: `h != 0`.
pub fn build_right_points(samples: &[f64], h: f64) -> Result<Vec<Point3<f64>>, ParalineError> {
    if h == 0.0 || !h.is_finite() {
        return Err(ParalineError::invalid(format!(
            "H must be non-zero and finite, got {h}"
        )));
    }
    Ok(samples
        .iter()
        .map(|&a| {
            let b = (h * h - a * a) / (2.0 * h);
            Point3::new(b, -a, 0.0)
        })
        .collect())
}

/// Close the right half into a loop.
///
/// `mirrored = reverse(right)` with x negated, so `mirrored[0]` is the mirror of
/// `right[last]`. The result is `right ++ mirrored[1..] ++ [right[0]]`, of
/// length `2 * right.len()`. Empty input gives an empty boundary.
pub fn build_closed_boundary(right_points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let Some(&first) = right_points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(2 * right_points.len());
    out.extend_from_slice(right_points);
    out.extend(
        right_points
            .iter()
            .rev()
            .skip(1)
            .map(|p| Point3::new(-p.x, p.y, p.z)),
    );
    out.push(first);
    out
}

/// Validate `params` and run the full generator with default limits.
pub fn closed_boundary(params: &ParalineParams) -> Result<Vec<Point3<f64>>, ParalineError> {
    closed_boundary_with(params, &GenCfg::default())
}

/// Validate `params` and run the full generator.
pub fn closed_boundary_with(
    params: &ParalineParams,
    cfg: &GenCfg,
) -> Result<Vec<Point3<f64>>, ParalineError> {
    let steps = params.validate(cfg)?;
    boundary_for_steps(params, steps)
}

/// Generator body for parameters already validated to `steps` samples.
pub(crate) fn boundary_for_steps(
    params: &ParalineParams,
    steps: usize,
) -> Result<Vec<Point3<f64>>, ParalineError> {
    let samples = samples_for_steps(params.h, steps);
    let right = build_right_points(&samples, params.h)?;
    let boundary = build_closed_boundary(&right);
    tracing::debug!(
        h = params.h,
        resolution = params.resolution,
        steps,
        points = boundary.len(),
        "closed boundary"
    );
    Ok(boundary)
}
