use crate::filter::boxcar::BoxcarFilter;
use crate::filter::filter_trait::Filter;
use crate::filter::tabulated::TabulatedFilter;

use lazy_static::lazy_static;

/// Kepler passband transmission sampled every 25 nm from 350 nm to 950 nm
const KEPLER_TRANSMISSION: [f64; 25] = [
    0.000, 0.001, 0.000, 0.056, 0.465, 0.536, 0.624, 0.663, 0.681, 0.715, 0.713, 0.696, 0.670,
    0.649, 0.616, 0.574, 0.541, 0.490, 0.468, 0.400, 0.332, 0.279, 0.020, 0.000, 0.000,
];

fn boxcar(name: &str, wl_min: f64, wl_max: f64) -> Filter {
    BoxcarFilter::new(name, wl_min, wl_max)
        .expect("standard boxcar limits are valid")
        .into()
}

lazy_static! {
    /// SDSS g' boxcar, 400-550 nm
    pub static ref SDSS_G: Filter = boxcar("g'", 400.0, 550.0);
    /// SDSS r' boxcar, 570-690 nm
    pub static ref SDSS_R: Filter = boxcar("r'", 570.0, 690.0);
    /// SDSS i' boxcar, 710-790 nm
    pub static ref SDSS_I: Filter = boxcar("i'", 710.0, 790.0);
    /// SDSS z' boxcar, 810-900 nm
    pub static ref SDSS_Z: Filter = boxcar("z'", 810.0, 900.0);
    /// Tabulated Kepler passband
    pub static ref KEPLER: Filter = {
        let wl: Vec<f64> = (0..KEPLER_TRANSMISSION.len())
            .map(|i| 350.0 + 25.0 * i as f64)
            .collect();
        TabulatedFilter::new("kepler", wl, KEPLER_TRANSMISSION)
            .expect("Kepler table is valid")
            .into()
    };
}
