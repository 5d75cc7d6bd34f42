pub(super) use crate::error::FilterError;

use enum_dispatch::enum_dispatch;
pub(super) use ndarray::{Array1, ArrayView1};
pub(super) use schemars::JsonSchema;
pub(super) use serde::de::DeserializeOwned;
pub(super) use serde::{Deserialize, Serialize};
pub(super) use std::fmt::Debug;

/// Default lower wavelength limit, nm
pub const DEFAULT_WL_MIN: f64 = 250.0;
/// Default upper wavelength limit, nm
pub const DEFAULT_WL_MAX: f64 = 1000.0;

/// Offset from the wavelength limits used by [FilterTrait::sample]
const SAMPLE_EDGE_OFFSET: f64 = 1e-5;

#[enum_dispatch]
pub trait FilterTrait: Clone + Debug + Send + Serialize + DeserializeOwned + JsonSchema {
    /// Passband name
    fn name(&self) -> &str;

    /// Wavelength range `(wl_min, wl_max)` covered by the filter, nm
    fn wl_range(&self) -> (f64, f64);

    /// Transmission at a single wavelength
    fn transmission(&self, wl: f64) -> Result<f64, FilterError>;

    /// Transmission for every wavelength of the array
    fn evaluate(&self, wl: ArrayView1<f64>) -> Result<Array1<f64>, FilterError> {
        wl.iter().map(|&x| self.transmission(x)).collect()
    }

    /// Wavelengths and transmissions of `n` points evenly covering the wavelength range
    fn sample(&self, n: usize) -> Result<(Array1<f64>, Array1<f64>), FilterError> {
        if n < 2 {
            return Err(FilterError::SampleSize(n));
        }
        let (wl_min, wl_max) = self.wl_range();
        let wl = Array1::linspace(
            wl_min + SAMPLE_EDGE_OFFSET,
            wl_max - SAMPLE_EDGE_OFFSET,
            n,
        );
        let tm = self.evaluate(wl.view())?;
        Ok((wl, tm))
    }
}

/// Photometric passband
#[enum_dispatch(FilterTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum Filter {
    Clear(super::clear::ClearFilter),
    Boxcar(super::boxcar::BoxcarFilter),
    Tabulated(super::tabulated::TabulatedFilter),
}
