//! Configuration management for the sampler
//!
//! This module handles configuration structures, defaults, and validation
//! for basis function sampling runs.

mod args;

pub use args::Args;

use basis::PrimitiveParams;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub primitives: Vec<PrimitiveParams>,
    pub contracted: Option<Vec<ContractionParams>>,
    #[serde(default)]
    pub points: Vec<[f64; 3]>,
    pub normalization: Option<NormalizationParams>,
}

/// A contracted function: shared center and powers, (exponent, coefficient) pairs
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContractionParams {
    #[serde(default = "ContractionParams::default_origin")]
    pub origin: Vec<f64>,
    #[serde(default = "ContractionParams::default_powers")]
    pub powers: Vec<u32>,
    pub primitives: Vec<(f64, f64)>,
}

impl ContractionParams {
    fn default_origin() -> Vec<f64> {
        vec![0.0; 3]
    }

    fn default_powers() -> Vec<u32> {
        vec![0; 3]
    }
}

const DEFAULT_HALF_WIDTH: f64 = 10.0;
const DEFAULT_STEPS: usize = 100;

/// Numerical normalization check parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NormalizationParams {
    pub enabled: Option<bool>,
    /// Half width of the integration cube around each function's center
    pub half_width: Option<f64>,
    /// Simpson subdivisions per axis
    pub steps: Option<usize>,
}

impl Default for NormalizationParams {
    fn default() -> Self {
        NormalizationParams {
            enabled: Some(false),
            half_width: Some(DEFAULT_HALF_WIDTH),
            steps: Some(DEFAULT_STEPS),
        }
    }
}

impl NormalizationParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.enabled.is_none() {
            self.enabled = defaults.enabled;
        }
        if self.half_width.is_none() {
            self.half_width = defaults.half_width;
        }
        if self.steps.is_none() {
            self.steps = defaults.steps;
        }
        self
    }

    /// Half width of the integration cube, defaulted when unset
    pub fn half_width(&self) -> f64 {
        self.half_width.unwrap_or(DEFAULT_HALF_WIDTH)
    }

    /// Simpson subdivisions per axis, defaulted when unset
    pub fn steps(&self) -> usize {
        self.steps.unwrap_or(DEFAULT_STEPS)
    }
}

impl Config {
    /// Apply default values to all optional sections
    pub fn with_defaults(mut self) -> Self {
        if self.contracted.is_none() {
            self.contracted = Some(Vec::new());
        }
        self.normalization = Some(self.normalization.unwrap_or_default().with_defaults());
        self
    }

    /// Fold command-line overrides into the configuration
    pub fn apply_overrides(&mut self, args: &Args) {
        let mut params = self.normalization.take().unwrap_or_default().with_defaults();
        if args.check_normalization {
            params.enabled = Some(true);
        }
        if let Some(steps) = args.steps {
            params.steps = Some(steps);
        }
        if let Some(half_width) = args.half_width {
            params.half_width = Some(half_width);
        }
        self.normalization = Some(params);
    }

    pub fn contractions(&self) -> &[ContractionParams] {
        self.contracted.as_deref().unwrap_or(&[])
    }

    pub fn is_normalization_enabled(&self) -> bool {
        self.normalization
            .as_ref()
            .and_then(|p| p.enabled)
            .unwrap_or(false)
    }

    pub fn normalization_params(&self) -> NormalizationParams {
        self.normalization.clone().unwrap_or_default().with_defaults()
    }
}
