// We cannot return `LightCurveSet`, because it would cause cyclic crate dependencies
/// Time and flux arrays of several observing sectors of the same target
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorLightCurves {
    pub times: Vec<Vec<f64>>,
    pub fluxes: Vec<Vec<f64>>,
}

impl SectorLightCurves {
    pub fn push(&mut self, time: Vec<f64>, flux: Vec<f64>) {
        assert_eq!(time.len(), flux.len());
        self.times.push(time);
        self.fluxes.push(flux);
    }

    pub fn n_curves(&self) -> usize {
        self.times.len()
    }

    pub fn n_points(&self) -> usize {
        self.times.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub(super) enum Error {
    #[error(transparent)]
    CsvError(#[from] csv::Error),
}
