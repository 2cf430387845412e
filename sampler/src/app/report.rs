use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub point: [f64; 3],
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub label: String,
    pub norm: f64,
    pub values: Vec<PointValue>,
    /// Numerical integral of |g|^2, when the check was enabled
    pub numerical_norm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub functions: Vec<FunctionReport>,
}

pub fn report_summary(report: &Report) {
    info!("\nSampling finished.");
    for (idx, function) in report.functions.iter().enumerate() {
        info!("\nFunction {}: {}", idx + 1, function.label);
        info!("  Normalization constant: {:.10}", function.norm);
        for pv in &function.values {
            info!(
                "  g([{:+.6}, {:+.6}, {:+.6}]) = {:+.10e}",
                pv.point[0], pv.point[1], pv.point[2], pv.value
            );
        }
        if let Some(integral) = function.numerical_norm {
            info!(
                "  Numerical <g|g> = {:.8} (deviation {:.2e})",
                integral,
                (integral - 1.0).abs()
            );
        }
    }
}
