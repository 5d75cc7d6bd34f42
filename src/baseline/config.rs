use crate::basis::WindowMode;
use crate::parameters::{Bounds, ParameterDeclaration, Prior};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration of [`LegendreBaseline`](crate::LegendreBaseline)
///
/// Only `nlegendre` is required when deserializing, other fields default to the standard
/// multiplicative baseline: intercepts near unity and small polynomial coefficients.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LegendreBaselineConfig {
    /// Maximum degree of the Legendre polynomials
    pub nlegendre: usize,
    #[serde(default)]
    pub window_mode: WindowMode,
    #[serde(default = "LegendreBaselineConfig::default_block_name")]
    pub block_name: String,
    #[serde(default = "LegendreBaselineConfig::default_intercept_prior")]
    pub intercept_prior: Prior,
    #[serde(default = "LegendreBaselineConfig::default_intercept_bounds")]
    pub intercept_bounds: Bounds,
    #[serde(default = "LegendreBaselineConfig::default_coefficient_prior")]
    pub coefficient_prior: Prior,
    #[serde(default = "LegendreBaselineConfig::default_coefficient_bounds")]
    pub coefficient_bounds: Bounds,
}

impl LegendreBaselineConfig {
    pub fn new(nlegendre: usize) -> Self {
        Self {
            nlegendre,
            window_mode: WindowMode::default(),
            block_name: Self::default_block_name(),
            intercept_prior: Self::default_intercept_prior(),
            intercept_bounds: Self::default_intercept_bounds(),
            coefficient_prior: Self::default_coefficient_prior(),
            coefficient_bounds: Self::default_coefficient_bounds(),
        }
    }

    pub fn with_window_mode(mut self, window_mode: WindowMode) -> Self {
        self.window_mode = window_mode;
        self
    }

    pub fn default_block_name() -> String {
        "baseline".to_owned()
    }

    pub fn default_intercept_prior() -> Prior {
        Prior::normal(1.0, 0.01)
    }

    pub fn default_intercept_bounds() -> Bounds {
        Bounds::new(0.98, 1.02)
    }

    pub fn default_coefficient_prior() -> Prior {
        Prior::normal(0.0, 0.001)
    }

    pub fn default_coefficient_bounds() -> Bounds {
        Bounds::new(-0.1, 0.1)
    }

    /// Number of parameters per light curve: intercept and `nlegendre` coefficients
    #[inline]
    pub fn size_per_curve(&self) -> usize {
        self.nlegendre + 1
    }

    /// Parameter declarations for `n_curves` light curves
    ///
    /// For every light curve `i` the intercept `bli_{i}` goes first, followed by the
    /// coefficients `bls_{i}_{k}` for `k` in `1..=nlegendre`.
    pub fn declarations(&self, n_curves: usize) -> Vec<ParameterDeclaration> {
        let mut declarations = Vec::with_capacity(n_curves * self.size_per_curve());
        for i in 0..n_curves {
            declarations.push(ParameterDeclaration::new(
                format!("bli_{i}"),
                format!("bl_intercept_{i}"),
                "",
                self.intercept_prior.clone(),
                self.intercept_bounds,
            ));
            for k in 1..=self.nlegendre {
                declarations.push(ParameterDeclaration::new(
                    format!("bls_{i}_{k}"),
                    format!("bl_c_{i}_{k}"),
                    "",
                    self.coefficient_prior.clone(),
                    self.coefficient_bounds,
                ));
            }
        }
        declarations
    }
}
