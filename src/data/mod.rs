mod light_curve_set;
pub use light_curve_set::{LightCurve, LightCurveSet};
