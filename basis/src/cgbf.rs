/* Contracted gaussian basis functions (CGBF), built on pgbf.rs.

   A contraction is a fixed linear combination of primitives that share
   one center and one set of powers, normalized to unit self-overlap.
*/

use crate::basis::Basis;
use crate::error::BasisError;
use crate::pgbf::PrimitiveGaussian;
use itertools::iproduct;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

// Serialized form: primitives as (exponent, coefficient) pairs, norms re-derived on load
#[derive(Debug, Serialize, Deserialize)]
struct ContractionParams {
    origin: [f64; 3],
    powers: [u32; 3],
    primitives: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContractionParams", into = "ContractionParams")]
pub struct ContractedGaussian {
    origin: Vector3<f64>,
    powers: [u32; 3],
    coefficients: Vec<f64>,
    primitives: Vec<PrimitiveGaussian>,
    norm: f64,
}

impl ContractedGaussian {
    pub fn new(origin: Vector3<f64>, powers: [u32; 3]) -> Self {
        Self {
            origin,
            powers,
            coefficients: Vec::new(),
            primitives: Vec::new(),
            norm: 1.0,
        }
    }

    pub fn from_slices(origin: &[f64], powers: &[u32]) -> Result<Self, BasisError> {
        let origin: [f64; 3] = origin.try_into().map_err(|_| BasisError::InvalidArity {
            field: "origin",
            expected: 3,
            found: origin.len(),
        })?;
        let powers: [u32; 3] = powers.try_into().map_err(|_| BasisError::InvalidArity {
            field: "powers",
            expected: 3,
            found: powers.len(),
        })?;
        Ok(Self::new(Vector3::from(origin), powers))
    }

    /// Append a primitive with the contraction's center and powers, then renormalize.
    ///
    /// A primitive that leaves the contraction with no positive self-overlap
    /// is rejected and the contraction is left unchanged.
    pub fn add_primitive(&mut self, exponent: f64, coefficient: f64) -> Result<(), BasisError> {
        self.push_primitive(exponent, coefficient)?;
        // a failed normalize leaves the previous norm untouched
        if let Err(err) = self.normalize() {
            self.primitives.pop();
            self.coefficients.pop();
            return Err(err);
        }
        Ok(())
    }

    fn push_primitive(&mut self, exponent: f64, coefficient: f64) -> Result<(), BasisError> {
        let primitive = PrimitiveGaussian::new(exponent, self.origin, self.powers)?;
        self.primitives.push(primitive);
        self.coefficients.push(coefficient);
        Ok(())
    }

    /// Overlap of two normalized primitives sharing a center and powers:
    /// (2 sqrt(a b) / (a + b))^(L + 3/2).
    fn overlap_same_center(a: &PrimitiveGaussian, b: &PrimitiveGaussian) -> f64 {
        let lsum = a.angular_momentum() as f64;
        let (ea, eb) = (a.exponent(), b.exponent());
        (2.0 * (ea * eb).sqrt() / (ea + eb)).powf(lsum + 1.5)
    }

    /// Self-overlap of the contraction without its own normalization factor.
    fn raw_self_overlap(&self) -> f64 {
        iproduct!(0..self.len(), 0..self.len())
            .map(|(i, j)| {
                self.coefficients[i]
                    * self.coefficients[j]
                    * Self::overlap_same_center(&self.primitives[i], &self.primitives[j])
            })
            .sum()
    }

    /// Rescale to unit self-overlap. Fails when the coefficients cancel.
    pub fn normalize(&mut self) -> Result<(), BasisError> {
        if self.is_empty() {
            self.norm = 1.0;
            return Ok(());
        }
        let overlap = self.raw_self_overlap();
        if !overlap.is_finite() || overlap <= 0.0 {
            return Err(BasisError::DegenerateContraction(overlap));
        }
        self.norm = 1.0 / overlap.sqrt();
        debug!(
            "renormalized contraction of {} primitives: overlap={:.10}, norm={:.10}",
            self.len(),
            overlap,
            self.norm
        );
        Ok(())
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn powers(&self) -> [u32; 3] {
        self.powers
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// (coefficient, primitive) pairs in insertion order.
    pub fn primitives(&self) -> impl Iterator<Item = (f64, &PrimitiveGaussian)> {
        self.coefficients.iter().copied().zip(self.primitives.iter())
    }
}

impl Basis for ContractedGaussian {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        self.norm
            * self
                .primitives()
                .map(|(c, p)| c * p.evaluate(r))
                .sum::<f64>()
    }
}

impl TryFrom<ContractionParams> for ContractedGaussian {
    type Error = BasisError;

    fn try_from(params: ContractionParams) -> Result<Self, Self::Error> {
        let mut cgbf = ContractedGaussian::new(Vector3::from(params.origin), params.powers);
        for (exponent, coefficient) in params.primitives {
            cgbf.push_primitive(exponent, coefficient)?;
        }
        cgbf.normalize()?;
        Ok(cgbf)
    }
}

impl From<ContractedGaussian> for ContractionParams {
    fn from(cgbf: ContractedGaussian) -> Self {
        let o = cgbf.origin;
        ContractionParams {
            origin: [o.x, o.y, o.z],
            powers: cgbf.powers,
            primitives: cgbf.primitives().map(|(c, p)| (p.exponent(), c)).collect(),
        }
    }
}

impl ContractedGaussian {
    pub fn to_json(&self) -> Result<String, BasisError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, BasisError> {
        Ok(serde_json::from_str(s)?)
    }

    // Serialize to pickle format
    pub fn to_pickle(&self) -> Result<Vec<u8>, BasisError> {
        let options = serde_pickle::SerOptions::new();
        Ok(serde_pickle::to_vec(self, options)?)
    }

    // Deserialize from pickle format
    pub fn from_pickle(bytes: &[u8]) -> Result<Self, BasisError> {
        let options = serde_pickle::DeOptions::new();
        Ok(serde_pickle::from_slice(bytes, options)?)
    }

    // Save to file in pickle format
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> Result<(), BasisError> {
        let serialized = self.to_pickle()?;
        let mut file = File::create(filename)?;
        file.write_all(&serialized)?;
        Ok(())
    }

    // Load from file in pickle format
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, BasisError> {
        let mut file = File::open(filename)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Self::from_pickle(&buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::simpson_integration_3d;
    use approx::assert_relative_eq;

    // STO-3G hydrogen 1s
    fn sto3g_h1s(origin: Vector3<f64>) -> ContractedGaussian {
        let mut cgbf = ContractedGaussian::new(origin, [0, 0, 0]);
        for (alpha, c) in [
            (3.42525091, 0.15432897),
            (0.62391373, 0.53532814),
            (0.16885540, 0.44463454),
        ] {
            cgbf.add_primitive(alpha, c).unwrap();
        }
        cgbf
    }

    #[test]
    fn test_empty_contraction() {
        let cgbf = ContractedGaussian::new(Vector3::zeros(), [1, 0, 0]);
        assert!(cgbf.is_empty());
        assert_eq!(cgbf.norm(), 1.0);
        assert_eq!(cgbf.evaluate(&Vector3::new(0.3, 0.1, 0.0)), 0.0);
    }

    #[test]
    fn test_single_primitive_matches_primitive() {
        let mut cgbf = ContractedGaussian::new(Vector3::new(0.5, 0.0, -0.5), [0, 1, 0]);
        cgbf.add_primitive(0.9, 2.0).unwrap();
        // norm cancels the coefficient
        assert_relative_eq!(cgbf.norm(), 0.5, epsilon = 1e-12);

        let p = PrimitiveGaussian::new(0.9, Vector3::new(0.5, 0.0, -0.5), [0, 1, 0]).unwrap();
        let r = Vector3::new(0.1, 0.7, -0.2);
        assert_relative_eq!(cgbf.evaluate(&r), p.evaluate(&r), epsilon = 1e-12);
    }

    #[test]
    fn test_primitives_share_center_and_powers() {
        let origin = Vector3::new(1.0, -2.0, 0.25);
        let cgbf = sto3g_h1s(origin);
        assert_eq!(cgbf.len(), 3);
        for (_, p) in cgbf.primitives() {
            assert_eq!(p.origin(), origin);
            assert_eq!(p.powers(), [0, 0, 0]);
        }
        let coefficients: Vec<f64> = cgbf.primitives().map(|(c, _)| c).collect();
        assert_eq!(coefficients, vec![0.15432897, 0.53532814, 0.44463454]);
    }

    #[test]
    fn test_sto3g_is_nearly_normalized() {
        // STO-3G coefficients are already close to normalized
        let cgbf = sto3g_h1s(Vector3::zeros());
        assert_relative_eq!(cgbf.norm(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_contraction_numerical_normalization() {
        let mut cgbf = ContractedGaussian::new(Vector3::zeros(), [1, 0, 1]);
        cgbf.add_primitive(1.3, 0.4).unwrap();
        cgbf.add_primitive(0.6, 0.7).unwrap();

        let integrand = |x, y, z| cgbf.evaluate(&Vector3::new(x, y, z)).powi(2);
        let lower = Vector3::new(-10.0, -10.0, -10.0);
        let upper = Vector3::new(10.0, 10.0, 10.0);
        let integral = simpson_integration_3d(integrand, lower, upper, 100, 100, 100);
        let diff = (integral - 1.0).abs();
        assert!(diff < 1e-5, "Integral is not close to 1: got {}", integral);
    }

    #[test]
    fn test_from_slices_checks_arity() {
        let cgbf = ContractedGaussian::from_slices(&[1.0, 2.0, 3.0], &[0, 0, 1]).unwrap();
        assert_eq!(cgbf.origin(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(cgbf.powers(), [0, 0, 1]);

        let err = ContractedGaussian::from_slices(&[1.0, 2.0, 3.0], &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            BasisError::InvalidArity { field: "powers", expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_invalid_exponent_is_rejected() {
        let mut cgbf = ContractedGaussian::new(Vector3::zeros(), [0, 0, 0]);
        cgbf.add_primitive(1.0, 1.0).unwrap();
        let err = cgbf.add_primitive(-1.0, 0.5).unwrap_err();
        assert!(matches!(err, BasisError::InvalidExponent(_)));
        assert_eq!(cgbf.len(), 1);
    }

    #[test]
    fn test_zero_coefficient_is_degenerate() {
        let mut cgbf = ContractedGaussian::new(Vector3::zeros(), [0, 0, 0]);
        let err = cgbf.add_primitive(1.0, 0.0).unwrap_err();
        assert!(matches!(err, BasisError::DegenerateContraction(o) if o == 0.0));
        assert!(cgbf.is_empty());
        assert_eq!(cgbf.norm(), 1.0);
    }

    #[test]
    fn test_cancelling_pair_is_degenerate() {
        let mut cgbf = ContractedGaussian::new(Vector3::zeros(), [1, 0, 0]);
        cgbf.add_primitive(1.0, 1.0).unwrap();
        let norm = cgbf.norm();
        let err = cgbf.add_primitive(1.0, -1.0).unwrap_err();
        assert!(matches!(err, BasisError::DegenerateContraction(_)));

        // rejected primitive is rolled back
        assert_eq!(cgbf.len(), 1);
        assert_eq!(cgbf.norm(), norm);
        let r = Vector3::new(0.4, 0.1, -0.3);
        assert!(cgbf.evaluate(&r).is_finite());
    }

    #[test]
    fn test_json_rejects_degenerate_contraction() {
        let json = r#"{"origin":[0,0,0],"powers":[0,0,0],"primitives":[[1.0,1.0],[1.0,-1.0]]}"#;
        let err = ContractedGaussian::from_json(json).unwrap_err();
        assert!(err.to_string().contains("self-overlap"), "{}", err);
    }

    #[test]
    fn test_overlap_same_center_closed_form() {
        // matches the THO single-center overlap N_a N_b pi^1.5 (2l-1)!! / (2^L (a+b)^(L+3/2))
        let a = PrimitiveGaussian::new(1.3, Vector3::zeros(), [2, 0, 1]).unwrap();
        let b = PrimitiveGaussian::new(0.4, Vector3::zeros(), [2, 0, 1]).unwrap();
        let expected = a.norm() * b.norm() * std::f64::consts::PI.powf(1.5) * 3.0
            / (2.0_f64.powi(3) * 1.7_f64.powf(4.5));
        assert_relative_eq!(
            ContractedGaussian::overlap_same_center(&a, &b),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_json_round_trip_rederives_norms() {
        let cgbf = sto3g_h1s(Vector3::new(0.0, 0.0, 1.4));
        let json = cgbf.to_json().unwrap();
        assert!(!json.contains("norm"));
        let loaded = ContractedGaussian::from_json(&json).unwrap();
        assert_eq!(loaded, cgbf);
    }

    #[test]
    fn test_json_rejects_bad_exponent() {
        let json = r#"{"origin":[0,0,0],"powers":[0,0,0],"primitives":[[0.0,1.0]]}"#;
        let err = ContractedGaussian::from_json(json).unwrap_err();
        assert!(matches!(err, BasisError::Json(_)));
    }

    #[test]
    fn test_pickle_file_round_trip() {
        let cgbf = sto3g_h1s(Vector3::new(0.3, 0.2, 0.1));
        let path = std::env::temp_dir().join(format!("cgbf_test_{}.pkl", std::process::id()));
        let filename = path.to_str().unwrap();
        cgbf.save_to_file(filename).unwrap();
        let loaded = ContractedGaussian::load_from_file(filename).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, cgbf);
    }
}
