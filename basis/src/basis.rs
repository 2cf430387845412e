use nalgebra::Vector3;

/// A real-valued function of a point in space, e.g. an atomic orbital.
pub trait Basis {
    /// Amplitude of the function at `r`.
    fn evaluate(&self, r: &Vector3<f64>) -> f64;
}
