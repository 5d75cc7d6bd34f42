use serde::Deserialize;

/// Row of a light-curve CSV file
#[derive(Deserialize)]
pub(super) struct FluxRecord {
    pub(super) time: f64,
    pub(super) flux: f64,
    pub(super) sector: u32,
}
