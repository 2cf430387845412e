//! Primitive Gaussian basis functions
//!
//! ```text
//! g(x,y,z) = A * (x-x0)^i * (y-y0)^j * (z-z0)^k * exp(-a * |r-r0|^2)
//! ```
//!
//! The normalization constant A is fixed by the exponent and powers (THO eq. 2.2).

use crate::basis::Basis;
use crate::error::BasisError;
use crate::helper::{fact2, norm2};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Serialized shape of a primitive. Holds no normalization; it is always
/// re-derived when converting into a [`PrimitiveGaussian`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveParams {
    pub exponent: f64,
    #[serde(default = "PrimitiveParams::default_origin")]
    pub origin: Vec<f64>,
    #[serde(default = "PrimitiveParams::default_powers")]
    pub powers: Vec<u32>,
}

impl PrimitiveParams {
    fn default_origin() -> Vec<f64> {
        vec![0.0; 3]
    }

    fn default_powers() -> Vec<u32> {
        vec![0; 3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrimitiveParams", into = "PrimitiveParams")]
pub struct PrimitiveGaussian {
    exponent: f64,
    origin: Vector3<f64>,
    powers: [u32; 3],
    norm: f64,
}

// x^n with 0^0 == 1, independent of the platform pow convention.
// n fits in i32: construction rejects larger powers.
fn ipow(x: f64, n: u32) -> f64 {
    if n == 0 {
        1.0
    } else {
        x.powi(n as i32)
    }
}

impl PrimitiveGaussian {
    pub fn new(exponent: f64, origin: Vector3<f64>, powers: [u32; 3]) -> Result<Self, BasisError> {
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(BasisError::InvalidExponent(exponent));
        }
        let norm = Self::compute_norm(exponent, powers)?;
        Ok(Self {
            exponent,
            origin,
            powers,
            norm,
        })
    }

    /// s-type primitive centered at the origin.
    pub fn at_origin(exponent: f64) -> Result<Self, BasisError> {
        Self::new(exponent, Vector3::zeros(), [0, 0, 0])
    }

    /// Build from loosely shaped input, checking that `origin` and `powers`
    /// each carry exactly three components.
    pub fn from_slices(exponent: f64, origin: &[f64], powers: &[u32]) -> Result<Self, BasisError> {
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
        Self::new(exponent, Vector3::from(origin), powers)
    }

    // N^2 = 2^(2L+3/2) a^(L+3/2) / ((2l-1)!! (2m-1)!! (2n-1)!! pi^(3/2)), L = l+m+n
    fn compute_norm(exponent: f64, powers: [u32; 3]) -> Result<f64, BasisError> {
        // 2p - 1 for each axis, as the i32 argument of fact2
        let mut odd = [0i32; 3];
        for (slot, &p) in odd.iter_mut().zip(powers.iter()) {
            *slot = i32::try_from(2 * i64::from(p) - 1)
                .map_err(|_| BasisError::PowersOutOfRange(powers))?;
        }
        let lsum: f64 = powers.iter().map(|&p| f64::from(p)).sum();

        let numerator = 2.0_f64.powf(2.0 * lsum + 1.5) * exponent.powf(lsum + 1.5);
        let denominator = fact2(odd[0]) * fact2(odd[1]) * fact2(odd[2]);

        Ok((numerator / denominator / PI.powf(1.5)).sqrt())
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn powers(&self) -> [u32; 3] {
        self.powers
    }

    /// The normalization constant A.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Total angular momentum i + j + k.
    pub fn angular_momentum(&self) -> u64 {
        self.powers.iter().map(|&p| u64::from(p)).sum()
    }

    pub fn evaluate_xyz(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate(&Vector3::new(x, y, z))
    }
}

impl Basis for PrimitiveGaussian {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        let [i, j, k] = self.powers;
        let d = r - self.origin;
        let d2 = norm2(&d);
        self.norm * ipow(d.x, i) * ipow(d.y, j) * ipow(d.z, k) * (-self.exponent * d2).exp()
    }
}

impl TryFrom<PrimitiveParams> for PrimitiveGaussian {
    type Error = BasisError;

    fn try_from(params: PrimitiveParams) -> Result<Self, Self::Error> {
        Self::from_slices(params.exponent, &params.origin, &params.powers)
    }
}

impl From<PrimitiveGaussian> for PrimitiveParams {
    fn from(g: PrimitiveGaussian) -> Self {
        PrimitiveParams {
            exponent: g.exponent,
            origin: g.origin.iter().copied().collect(),
            powers: g.powers.to_vec(),
        }
    }
}

impl fmt::Display for PrimitiveGaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.origin;
        let [i, j, k] = self.powers;
        write!(
            f,
            "pgbf({:.6},{:?},{:?})",
            self.exponent,
            (o.x, o.y, o.z),
            (i, j, k)
        )
    }
}
