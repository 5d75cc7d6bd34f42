use lazy_static::lazy_static;
use record::FluxRecord;
use types::{Error, SectorLightCurves};

mod csv_parser;
pub(crate) mod embedded;
mod record;
pub(crate) mod synthetic;
pub(crate) mod types;

lazy_static! {
    pub static ref ALL_LIGHT_CURVES: Vec<(String, SectorLightCurves)> = {
        let mut v = embedded::EMBEDDED_LIGHT_CURVES.clone();
        v.extend(
            synthetic::SYNTHETIC_LIGHT_CURVES
                .iter()
                .map(|synth| (synth.name.clone(), synth.light_curves.clone())),
        );
        v
    };
}
