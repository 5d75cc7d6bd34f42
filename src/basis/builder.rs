use crate::basis::legendre::legendre_vander;
use crate::error::{BaselineError, ConfigurationError};

use itertools::{Itertools, MinMaxResult};
use log::debug;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How centred time stamps are scaled to the dimensionless Legendre argument
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// A single window, the peak-to-peak range of all mean-centred light curves concatenated
    #[default]
    Global,
    /// Every light curve uses the peak-to-peak range of its own centred time stamps
    PerCurve,
}

/// Builds [`LegendreBasis`] design matrices for a set of light curves
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct BasisBuilder {
    degree: usize,
    window_mode: WindowMode,
}

impl BasisBuilder {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            window_mode: WindowMode::default(),
        }
    }

    pub fn with_window_mode(mut self, window_mode: WindowMode) -> Self {
        self.window_mode = window_mode;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    /// Build the design matrices
    ///
    /// Each light curve is centred on its own mean time and divided by the window, the resulting
    /// dimensionless times are used as the argument of Legendre polynomials of degree
    /// `0..=degree`.
    pub fn build<S>(&self, times: &[ArrayBase<S, Ix1>]) -> Result<LegendreBasis, BaselineError>
    where
        S: Data<Elem = f64>,
    {
        if times.is_empty() {
            return Err(ConfigurationError::NoLightCurves.into());
        }
        for (index, t) in times.iter().enumerate() {
            if t.is_empty() {
                return Err(ConfigurationError::EmptyLightCurve { index }.into());
            }
            if let Some(position) = t.iter().position(|x| !x.is_finite()) {
                return Err(ConfigurationError::NonFiniteTime { index, position }.into());
            }
        }

        let centers: Vec<f64> = times
            .iter()
            .map(|t| t.sum() / t.len() as f64)
            .collect();
        let centered: Vec<Array1<f64>> = times
            .iter()
            .zip(&centers)
            .map(|(t, &c)| t.mapv(|x| x - c))
            .collect();

        let windows = match self.window_mode {
            WindowMode::Global => {
                let window = peak_to_peak(centered.iter().flatten().copied());
                vec![window; centered.len()]
            }
            WindowMode::PerCurve => centered
                .iter()
                .map(|t| peak_to_peak(t.iter().copied()))
                .collect(),
        };
        if let Some(&window) = windows.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(BaselineError::DegenerateWindow { window });
        }

        let bases: Vec<_> = centered
            .into_iter()
            .zip(&windows)
            .map(|(t, &window)| legendre_vander(&(t / window), self.degree))
            .collect();
        debug!(
            "Legendre basis of degree {} built for {} light curves, windows: {:?}",
            self.degree,
            bases.len(),
            windows,
        );

        Ok(LegendreBasis {
            degree: self.degree,
            window_mode: self.window_mode,
            centers,
            windows,
            bases,
        })
    }
}

fn peak_to_peak(values: impl Iterator<Item = f64>) -> f64 {
    match values.minmax() {
        MinMaxResult::MinMax(min, max) => max - min,
        MinMaxResult::OneElement(_) | MinMaxResult::NoElements => 0.0,
    }
}

/// Legendre design matrices of a set of light curves
///
/// Matrices are immutable, a new basis must be built when time stamps or degree change.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendreBasis {
    degree: usize,
    window_mode: WindowMode,
    centers: Vec<f64>,
    windows: Vec<f64>,
    bases: Vec<Array2<f64>>,
}

impl LegendreBasis {
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    #[inline]
    pub fn n_curves(&self) -> usize {
        self.bases.len()
    }

    /// The shared time window, `None` for [`WindowMode::PerCurve`]
    pub fn global_window(&self) -> Option<f64> {
        match self.window_mode {
            WindowMode::Global => self.windows.first().copied(),
            WindowMode::PerCurve => None,
        }
    }

    /// Time window dividing the centred time stamps of every light curve
    pub fn windows(&self) -> &[f64] {
        &self.windows
    }

    /// Mean time of every light curve
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// `(n_points_i, degree + 1)` design matrices
    pub fn bases(&self) -> &[Array2<f64>] {
        &self.bases
    }

    pub fn get(&self, curve: usize) -> Option<&Array2<f64>> {
        self.bases.get(curve)
    }

    /// Design matrix of light curve `curve` at arbitrary time stamps
    ///
    /// The normalisation of the light curve is reused, so the result is consistent with
    /// [`LegendreBasis::bases`] for the original time stamps.
    pub fn vander_at<S>(
        &self,
        curve: usize,
        times: &ArrayBase<S, Ix1>,
    ) -> Result<Array2<f64>, ConfigurationError>
    where
        S: Data<Elem = f64>,
    {
        let (center, window) = match (self.centers.get(curve), self.windows.get(curve)) {
            (Some(&c), Some(&w)) => (c, w),
            _ => {
                return Err(ConfigurationError::NoSuchLightCurve {
                    index: curve,
                    n_curves: self.n_curves(),
                });
            }
        };
        Ok(legendre_vander(
            &times.mapv(|t| (t - center) / window),
            self.degree,
        ))
    }
}
