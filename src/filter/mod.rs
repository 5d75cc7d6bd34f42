//! Photometric passbands
//!
//! [Filter] is a closed set of passband kinds sharing [FilterTrait]. Standard passbands are
//! available as lazily-initialised statics.

mod boxcar;
pub use boxcar::BoxcarFilter;

mod clear;
pub use clear::ClearFilter;

mod filter_trait;
pub use filter_trait::{DEFAULT_WL_MAX, DEFAULT_WL_MIN, Filter, FilterTrait};

mod spline;

mod standard;
pub use standard::{KEPLER, SDSS_G, SDSS_I, SDSS_R, SDSS_Z};

mod tabulated;
pub use tabulated::TabulatedFilter;
