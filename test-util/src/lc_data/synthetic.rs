use crate::lc_data::SectorLightCurves;

use lazy_static::lazy_static;
use light_curve_baseline::BasisBuilder;
use light_curve_baseline::ndarray::{Array1, s};
use rand::prelude::*;
use rand_distr::{Normal, StandardNormal};

/// Sector light curves drawn around a known Legendre baseline
#[derive(Clone, Debug)]
pub struct SyntheticLightCurves {
    pub name: String,
    pub nlegendre: usize,
    /// Noisy observations
    pub light_curves: SectorLightCurves,
    /// Noiseless baseline at every observation
    pub baselines: Vec<Vec<f64>>,
    /// Baseline parameters, intercept first for every sector
    pub coefficients: Vec<f64>,
}

const SECTOR_DURATION: f64 = 27.4;
const ORBIT_GAP: f64 = 1.0;

/// Generate `n_sectors` sectors of `n_points` observations each
///
/// Every sector has a mid-sector downlink gap, fluxes are the baseline multiplied by
/// `1 + noise * N(0, 1)`.
pub fn synthetic_light_curves(
    seed: u64,
    n_sectors: usize,
    n_points: usize,
    nlegendre: usize,
    noise: f64,
) -> SyntheticLightCurves {
    let mut rng = StdRng::seed_from_u64(seed);
    let intercept = Normal::<f64>::new(1.0, 0.003).unwrap();
    let slope = Normal::<f64>::new(0.0, 0.0005).unwrap();

    let start: f64 = rng.random_range(1300.0..2500.0);
    let times: Vec<Vec<f64>> = (0..n_sectors)
        .map(|i| {
            let t0 = start + i as f64 * (SECTOR_DURATION + rng.random_range(0.0..30.0));
            let mut t: Vec<f64> = (0..n_points)
                .map(|_| {
                    let dt = rng.random_range(0.0..SECTOR_DURATION - ORBIT_GAP);
                    if dt < 0.5 * (SECTOR_DURATION - ORBIT_GAP) {
                        t0 + dt
                    } else {
                        t0 + dt + ORBIT_GAP
                    }
                })
                .collect();
            t.sort_by(f64::total_cmp);
            t
        })
        .collect();

    let coefficients: Vec<f64> = (0..n_sectors)
        .flat_map(|_| {
            let mut c = vec![intercept.sample(&mut rng).clamp(0.985, 1.015)];
            c.extend((0..nlegendre).map(|_| slope.sample(&mut rng).clamp(-0.005, 0.005)));
            c
        })
        .collect();

    let time_arrays: Vec<Array1<f64>> = times.iter().cloned().map(Array1::from).collect();
    let basis = BasisBuilder::new(nlegendre).build(&time_arrays).unwrap();
    let coefficients_array = Array1::from(coefficients.clone());
    let baselines: Vec<Vec<f64>> = basis
        .bases()
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let k = nlegendre + 1;
            b.dot(&coefficients_array.slice(s![i * k..(i + 1) * k]))
                .to_vec()
        })
        .collect();

    let mut light_curves = SectorLightCurves::default();
    for (t, bl) in times.into_iter().zip(&baselines) {
        let flux = bl
            .iter()
            .map(|&b| {
                let eps: f64 = rng.sample(StandardNormal);
                b * (1.0 + noise * eps)
            })
            .collect();
        light_curves.push(t, flux);
    }

    SyntheticLightCurves {
        name: format!("synthetic_seed{seed}_sectors{n_sectors}_n{n_points}_deg{nlegendre}"),
        nlegendre,
        light_curves,
        baselines,
        coefficients,
    }
}

lazy_static! {
    pub static ref SYNTHETIC_LIGHT_CURVES: Vec<SyntheticLightCurves> = vec![
        synthetic_light_curves(0, 1, 500, 2, 5e-4),
        synthetic_light_curves(1, 3, 1000, 3, 1e-3),
        synthetic_light_curves(2, 5, 20, 1, 0.0),
        synthetic_light_curves(3, 2, 2000, 5, 2e-4),
    ];
}
