use crate::error::ConfigurationError;

use ndarray::{Array1, ArrayView1, s};
use std::ops::Range;

/// A single light curve borrowed from a [`LightCurveSet`]
#[derive(Clone, Copy, Debug)]
pub struct LightCurve<'a> {
    pub time: ArrayView1<'a, f64>,
    pub flux: ArrayView1<'a, f64>,
}

impl LightCurve<'_> {
    /// Number of observations
    #[inline]
    pub fn lenu(&self) -> usize {
        self.time.len()
    }
}

/// Set of independent light curves stored as concatenated arrays
///
/// Light curves are identified by their position `0..n_curves()`. The index range of each light
/// curve in the concatenated arrays is given by [`LightCurveSet::slices`].
#[derive(Clone, Debug, PartialEq)]
pub struct LightCurveSet {
    timea: Array1<f64>,
    fluxa: Array1<f64>,
    slices: Vec<Range<usize>>,
}

impl LightCurveSet {
    /// Construct from per-light-curve time and flux sequences
    ///
    /// Every light curve must be non-empty, have finite time stamps and as many flux values as
    /// time stamps.
    pub fn new<T, F>(times: &[T], fluxes: &[F]) -> Result<Self, ConfigurationError>
    where
        T: AsRef<[f64]>,
        F: AsRef<[f64]>,
    {
        if times.is_empty() {
            return Err(ConfigurationError::NoLightCurves);
        }
        if times.len() != fluxes.len() {
            return Err(ConfigurationError::LightCurveCountMismatch {
                n_times: times.len(),
                n_fluxes: fluxes.len(),
            });
        }

        let total = times.iter().map(|t| t.as_ref().len()).sum();
        let mut timea = Vec::with_capacity(total);
        let mut fluxa = Vec::with_capacity(total);
        let mut slices = Vec::with_capacity(times.len());

        for (index, (t, f)) in times.iter().zip(fluxes).enumerate() {
            let (t, f) = (t.as_ref(), f.as_ref());
            if t.is_empty() {
                return Err(ConfigurationError::EmptyLightCurve { index });
            }
            if t.len() != f.len() {
                return Err(ConfigurationError::LengthMismatch {
                    index,
                    n_times: t.len(),
                    n_fluxes: f.len(),
                });
            }
            if let Some(position) = t.iter().position(|x| !x.is_finite()) {
                return Err(ConfigurationError::NonFiniteTime { index, position });
            }
            let start = timea.len();
            timea.extend_from_slice(t);
            fluxa.extend_from_slice(f);
            slices.push(start..timea.len());
        }

        Ok(Self {
            timea: timea.into(),
            fluxa: fluxa.into(),
            slices,
        })
    }

    /// Number of light curves
    #[inline]
    pub fn n_curves(&self) -> usize {
        self.slices.len()
    }

    /// Total number of observations over all light curves
    #[inline]
    pub fn n_points(&self) -> usize {
        self.timea.len()
    }

    /// Concatenated time stamps
    pub fn timea(&self) -> ArrayView1<'_, f64> {
        self.timea.view()
    }

    /// Concatenated fluxes
    pub fn fluxa(&self) -> ArrayView1<'_, f64> {
        self.fluxa.view()
    }

    /// Index range of every light curve in the concatenated arrays
    pub fn slices(&self) -> &[Range<usize>] {
        &self.slices
    }

    pub fn get(&self, index: usize) -> Option<LightCurve<'_>> {
        let range = self.slices.get(index)?.clone();
        Some(LightCurve {
            time: self.timea.slice(s![range.clone()]),
            flux: self.fluxa.slice(s![range]),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = LightCurve<'_>> {
        (0..self.n_curves()).filter_map(|i| self.get(i))
    }

    /// Per-light-curve time views
    pub fn times(&self) -> Vec<ArrayView1<'_, f64>> {
        self.iter().map(|lc| lc.time).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn concatenation_and_slices() {
        let times = [vec![0.0, 1.0, 2.0], vec![10.0, 11.0]];
        let fluxes = [vec![1.0, 1.1, 1.2], vec![0.9, 0.8]];
        let lcs = LightCurveSet::new(&times, &fluxes).unwrap();

        assert_eq!(lcs.n_curves(), 2);
        assert_eq!(lcs.n_points(), 5);
        assert_eq!(lcs.slices(), &[0..3, 3..5]);
        assert_eq!(lcs.timea(), array![0.0, 1.0, 2.0, 10.0, 11.0]);
        assert_eq!(lcs.fluxa(), array![1.0, 1.1, 1.2, 0.9, 0.8]);

        let second = lcs.get(1).unwrap();
        assert_eq!(second.lenu(), 2);
        assert_eq!(second.time, array![10.0, 11.0]);
        assert_eq!(second.flux, array![0.9, 0.8]);
        assert!(lcs.get(2).is_none());
    }

    #[test]
    fn no_light_curves() {
        let empty: [Vec<f64>; 0] = [];
        assert_eq!(
            LightCurveSet::new(&empty, &empty),
            Err(ConfigurationError::NoLightCurves)
        );
    }

    #[test]
    fn count_mismatch() {
        let times = [vec![0.0], vec![1.0]];
        let fluxes = [vec![1.0]];
        assert_eq!(
            LightCurveSet::new(&times, &fluxes),
            Err(ConfigurationError::LightCurveCountMismatch {
                n_times: 2,
                n_fluxes: 1
            })
        );
    }

    #[test]
    fn length_mismatch() {
        let times = [vec![0.0, 1.0], vec![2.0, 3.0, 4.0]];
        let fluxes = [vec![1.0, 1.0], vec![1.0, 1.0]];
        assert_eq!(
            LightCurveSet::new(&times, &fluxes),
            Err(ConfigurationError::LengthMismatch {
                index: 1,
                n_times: 3,
                n_fluxes: 2
            })
        );
    }

    #[test]
    fn empty_light_curve() {
        let times = [vec![0.0], vec![]];
        let fluxes = [vec![1.0], vec![]];
        assert_eq!(
            LightCurveSet::new(&times, &fluxes),
            Err(ConfigurationError::EmptyLightCurve { index: 1 })
        );
    }

    #[test]
    fn non_finite_time() {
        let times = [vec![0.0, f64::NAN]];
        let fluxes = [vec![1.0, 1.0]];
        assert_eq!(
            LightCurveSet::new(&times, &fluxes),
            Err(ConfigurationError::NonFiniteTime {
                index: 0,
                position: 1
            })
        );
    }
}
