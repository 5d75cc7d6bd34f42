use criterion::Criterion;
use light_curve_baseline::FilterTrait;
use light_curve_baseline::filter::{KEPLER, SDSS_R};
use light_curve_baseline::ndarray::Array1;
use std::hint::black_box;

pub fn bench_filter(c: &mut Criterion) {
    const COUNTS: [usize; 3] = [10, 100, 1000];

    for &n in COUNTS.iter() {
        let wl = Array1::linspace(351.0, 949.0, n);
        c.bench_function(format!("Kepler transmission {n}").as_str(), |b| {
            b.iter(|| KEPLER.evaluate(black_box(wl.view())).unwrap())
        });
        c.bench_function(format!("SDSS r' transmission {n}").as_str(), |b| {
            b.iter(|| SDSS_R.evaluate(black_box(wl.view())).unwrap())
        });
    }
}
