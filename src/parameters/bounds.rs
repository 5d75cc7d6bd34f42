use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inclusive interval of allowed parameter values
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub const fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Bounds are valid if they are not NaN and `lower <= upper`
    pub fn is_valid(&self) -> bool {
        self.lower <= self.upper
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Centre of the interval, `None` if any edge is infinite
    pub fn midpoint(&self) -> Option<f64> {
        self.is_finite().then(|| 0.5 * (self.lower + self.upper))
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.lower, self.upper)
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

pub(super) fn within_bounds<'a>(
    x: impl IntoIterator<Item = &'a f64>,
    bounds: impl IntoIterator<Item = &'a Bounds>,
) -> bool {
    x.into_iter().zip(bounds).all(|(&x, b)| b.contains(x))
}
