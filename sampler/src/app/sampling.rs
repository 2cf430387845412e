use super::functions::Function;
use super::report::{FunctionReport, PointValue};
use crate::config::NormalizationParams;
use basis::helper::simpson_integration_3d;
use basis::Basis;
use nalgebra::Vector3;
use tracing::info;

/// Evaluate `function` at every point
pub fn sample_points(function: &Function, points: &[[f64; 3]]) -> Vec<PointValue> {
    points
        .iter()
        .map(|&point| PointValue {
            point,
            value: function.evaluate(&Vector3::from(point)),
        })
        .collect()
}

/// Integrate |g|^2 over a cube centered on the function's origin
pub fn numerical_norm(function: &Function, params: &NormalizationParams) -> f64 {
    let (half_width, steps) = (params.half_width(), params.steps());

    let center = function.origin();
    let offset = Vector3::repeat(half_width);
    let integrand = |x, y, z| function.evaluate(&Vector3::new(x, y, z)).powi(2);

    simpson_integration_3d(integrand, center - offset, center + offset, steps, steps, steps)
}

pub fn sample_function(
    function: &Function,
    points: &[[f64; 3]],
    normalization: Option<&NormalizationParams>,
) -> FunctionReport {
    let label = function.label();
    info!("Sampling {} at {} points", label, points.len());

    let numerical_norm = normalization.map(|params| numerical_norm(function, params));

    FunctionReport {
        label,
        norm: function.norm(),
        values: sample_points(function, points),
        numerical_norm,
    }
}
