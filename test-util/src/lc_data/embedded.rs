use crate::lc_data::csv_parser::sectors_from_reader;
use crate::lc_data::{Error, SectorLightCurves};

use include_dir::{Dir, include_dir};
use lazy_static::lazy_static;
use std::path::Path;

const DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data");

fn try_embedded_light_curves<P>(path: P) -> Result<SectorLightCurves, Error>
where
    P: AsRef<Path>,
{
    let data = DATA_DIR.get_file(path).unwrap().contents();
    sectors_from_reader(data)
}

pub fn embedded_light_curves<P>(path: P) -> SectorLightCurves
where
    P: AsRef<Path>,
{
    try_embedded_light_curves(path).unwrap()
}

pub fn iter_embedded_light_curves() -> impl Iterator<Item = (String, SectorLightCurves)> {
    DATA_DIR.find("**/*.csv").unwrap().filter_map(|entry| {
        let path = entry.as_file()?.path();
        Some((
            path.to_str().unwrap().to_owned(),
            try_embedded_light_curves(path).ok()?,
        ))
    })
}

lazy_static! {
    pub static ref EMBEDDED_LIGHT_CURVES: Vec<(String, SectorLightCurves)> =
        iter_embedded_light_curves().collect();
}
