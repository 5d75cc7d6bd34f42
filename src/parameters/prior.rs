use crate::error::ParameterError;

use enum_dispatch::enum_dispatch;
use ordered_float::NotNan;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

#[enum_dispatch]
pub trait PriorTrait: Clone + Debug + Serialize + DeserializeOwned + PartialEq + Eq + Hash {
    /// Evaluate the natural logarithm of the prior density at x
    ///
    /// If `grad` is `Some`, the derivative d(ln_prior)/dx is also computed and stored in it.
    fn ln_prior(&self, x: f64, grad: Option<&mut f64>) -> f64;

    /// Expectation value, `None` for improper priors
    fn mean(&self) -> Option<f64>;

    /// Draw a random value, `None` for improper priors
    fn sample(&self, rng: &mut dyn RngCore) -> Option<f64>;
}

/// Prior distribution of a single model parameter
#[enum_dispatch(PriorTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Prior {
    None(NonePrior),
    LogNormal(LogNormalPrior),
    Normal(NormalPrior),
    Uniform(UniformPrior),
}

impl Prior {
    pub fn none() -> Self {
        NonePrior {}.into()
    }

    pub fn log_normal(mu: f64, std: f64) -> Self {
        LogNormalPrior::new(mu, std).into()
    }

    pub fn normal(mu: f64, std: f64) -> Self {
        NormalPrior::new(mu, std).into()
    }

    pub fn uniform(left: f64, right: f64) -> Self {
        UniformPrior::new(left, right).into()
    }
}

/// Improper flat prior
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct NonePrior {}

impl PriorTrait for NonePrior {
    fn ln_prior(&self, _x: f64, grad: Option<&mut f64>) -> f64 {
        if let Some(g) = grad {
            *g = 0.0;
        }
        0.0
    }

    fn mean(&self) -> Option<f64> {
        None
    }

    fn sample(&self, _rng: &mut dyn RngCore) -> Option<f64> {
        None
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(into = "GaussianParameters", try_from = "GaussianParameters")]
pub struct NormalPrior {
    mu: NotNan<f64>,
    std: NotNan<f64>,
    ln_prob_coeff: NotNan<f64>,
}

impl NormalPrior {
    /// Panics if `mu` is not finite or `std` is not positive and finite
    pub fn new(mu: f64, std: f64) -> Self {
        Self::try_new(mu, std).expect("mu must be finite, std must be positive and finite")
    }

    pub fn try_new(mu: f64, std: f64) -> Result<Self, ParameterError> {
        if !mu.is_finite() {
            return Err(ParameterError::InvalidPrior("mu must be finite"));
        }
        if !(std > 0.0 && std.is_finite()) {
            return Err(ParameterError::InvalidPrior("std must be positive and finite"));
        }
        let ln_prob_coeff = -f64::ln(std) - 0.5 * f64::ln(std::f64::consts::TAU);
        // All three values are finite here
        match (NotNan::new(mu), NotNan::new(std), NotNan::new(ln_prob_coeff)) {
            (Ok(mu), Ok(std), Ok(ln_prob_coeff)) => Ok(Self {
                mu,
                std,
                ln_prob_coeff,
            }),
            _ => Err(ParameterError::InvalidPrior("std must be positive and finite")),
        }
    }

    pub fn mu(&self) -> f64 {
        self.mu.into_inner()
    }

    pub fn std(&self) -> f64 {
        self.std.into_inner()
    }

    fn ln_prob_coeff(&self) -> f64 {
        self.ln_prob_coeff.into_inner()
    }
}

impl PriorTrait for NormalPrior {
    fn ln_prior(&self, x: f64, grad: Option<&mut f64>) -> f64 {
        let inv_std2 = self.std().powi(-2);
        let diff = self.mu() - x;
        let ln_prior = self.ln_prob_coeff() - 0.5 * diff.powi(2) * inv_std2;

        if let Some(g) = grad {
            *g = diff * inv_std2;
        }

        ln_prior
    }

    fn mean(&self) -> Option<f64> {
        Some(self.mu())
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Option<f64> {
        let z: f64 = rng.sample(StandardNormal);
        Some(self.mu() + self.std() * z)
    }
}

/// Normal distribution of ln(x)
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(into = "GaussianParameters", try_from = "GaussianParameters")]
pub struct LogNormalPrior {
    normal: NormalPrior,
}

impl LogNormalPrior {
    /// Panics if `mu` is not finite or `std` is not positive and finite
    pub fn new(mu: f64, std: f64) -> Self {
        Self {
            normal: NormalPrior::new(mu, std),
        }
    }

    pub fn try_new(mu: f64, std: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            normal: NormalPrior::try_new(mu, std)?,
        })
    }
}

impl PriorTrait for LogNormalPrior {
    fn ln_prior(&self, x: f64, grad: Option<&mut f64>) -> f64 {
        let ln_x = f64::ln(x);
        let diff = self.normal.mu() - ln_x;
        let inv_std2 = self.normal.std().powi(-2);
        let ln_prior = self.normal.ln_prob_coeff() - 0.5 * diff.powi(2) * inv_std2 - ln_x;

        if let Some(g) = grad {
            *g = (diff * inv_std2 - 1.0) / x;
        }

        ln_prior
    }

    fn mean(&self) -> Option<f64> {
        Some(f64::exp(
            self.normal.mu() + 0.5 * self.normal.std().powi(2),
        ))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Option<f64> {
        self.normal.sample(rng).map(f64::exp)
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "GaussianPrior")]
struct GaussianParameters {
    mu: f64,
    std: f64,
}

impl From<NormalPrior> for GaussianParameters {
    fn from(f: NormalPrior) -> Self {
        Self {
            mu: f.mu(),
            std: f.std(),
        }
    }
}

impl TryFrom<GaussianParameters> for NormalPrior {
    type Error = ParameterError;

    fn try_from(f: GaussianParameters) -> Result<Self, Self::Error> {
        Self::try_new(f.mu, f.std)
    }
}

impl From<LogNormalPrior> for GaussianParameters {
    fn from(f: LogNormalPrior) -> Self {
        f.normal.into()
    }
}

impl TryFrom<GaussianParameters> for LogNormalPrior {
    type Error = ParameterError;

    fn try_from(f: GaussianParameters) -> Result<Self, Self::Error> {
        Self::try_new(f.mu, f.std)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(into = "UniformParameters", try_from = "UniformParameters")]
pub struct UniformPrior {
    range: std::ops::RangeInclusive<NotNan<f64>>,
    ln_prob: NotNan<f64>,
}

impl UniformPrior {
    /// Panics if the limits are not finite or `right` is not larger than `left`
    pub fn new(left: f64, right: f64) -> Self {
        Self::try_new(left, right).expect("limits must be finite and right must be larger than left")
    }

    pub fn try_new(left: f64, right: f64) -> Result<Self, ParameterError> {
        if !(left.is_finite() && right.is_finite()) {
            return Err(ParameterError::InvalidPrior("limits must be finite"));
        }
        if left >= right {
            return Err(ParameterError::InvalidPrior("right must be larger than left"));
        }
        match (
            NotNan::new(left),
            NotNan::new(right),
            NotNan::new(-f64::ln(right - left)),
        ) {
            (Ok(left), Ok(right), Ok(ln_prob)) => Ok(Self {
                range: left..=right,
                ln_prob,
            }),
            _ => Err(ParameterError::InvalidPrior("limits must be finite")),
        }
    }

    pub fn left(&self) -> f64 {
        self.range.start().into_inner()
    }

    pub fn right(&self) -> f64 {
        self.range.end().into_inner()
    }

    fn ln_prob(&self) -> f64 {
        self.ln_prob.into_inner()
    }
}

impl PriorTrait for UniformPrior {
    fn ln_prior(&self, x: f64, grad: Option<&mut f64>) -> f64 {
        if let Some(g) = grad {
            *g = 0.0;
        }
        match NotNan::new(x) {
            Ok(x) if self.range.contains(&x) => self.ln_prob(),
            _ => f64::NEG_INFINITY,
        }
    }

    fn mean(&self) -> Option<f64> {
        Some(0.5 * (self.left() + self.right()))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Option<f64> {
        Some(rng.random_range(self.left()..=self.right()))
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "UniformPrior")]
struct UniformParameters {
    range: std::ops::RangeInclusive<f64>,
}

impl From<UniformPrior> for UniformParameters {
    fn from(f: UniformPrior) -> Self {
        Self {
            range: f.left()..=f.right(),
        }
    }
}

impl TryFrom<UniformParameters> for UniformPrior {
    type Error = ParameterError;

    fn try_from(f: UniformParameters) -> Result<Self, Self::Error> {
        Self::try_new(*f.range.start(), *f.range.end())
    }
}
