use crate::error::FilterError;

/// Minimum table size of a not-a-knot cubic spline
const MIN_POINTS: usize = 4;

/// Cubic spline through tabulated points with not-a-knot end conditions
///
/// Each segment `i` is `a + b dx + c dx^2 + d dx^3` with `dx = x - x_i`. The third derivative is
/// continuous at the second and the next-to-last nodes, so any cubic is reproduced exactly.
/// Evaluation outside of `[x_0, x_last]` is an error.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    coeffs: Vec<[f64; 4]>,
}

impl CubicSpline {
    pub(super) fn new(x: &[f64], y: &[f64]) -> Result<Self, FilterError> {
        if x.len() != y.len() {
            return Err(FilterError::SizeMismatch {
                n_wl: x.len(),
                n_tm: y.len(),
            });
        }
        let n = x.len();
        if n < MIN_POINTS {
            return Err(FilterError::TooFewPoints(n));
        }
        if x.iter().any(|v| !v.is_finite()) || x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FilterError::Unsorted);
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        // Tridiagonal system for c_1..c_{n-2}, the end coefficients are eliminated with the
        // not-a-knot conditions d_0 = d_1 and d_{n-3} = d_{n-2}
        let m = n - 2;
        let mut lower: Vec<f64> = (0..m).map(|k| h[k]).collect();
        let mut diag: Vec<f64> = (0..m).map(|k| 2.0 * (h[k] + h[k + 1])).collect();
        let mut upper: Vec<f64> = (0..m).map(|k| h[k + 1]).collect();
        let mut rhs: Vec<f64> = (0..m).map(|k| 3.0 * (slope[k + 1] - slope[k])).collect();

        let (h0, h1) = (h[0], h[1]);
        diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
        upper[0] = (h1 * h1 - h0 * h0) / h1;
        let (ha, hb) = (h[n - 3], h[n - 2]);
        lower[m - 1] = (ha * ha - hb * hb) / ha;
        diag[m - 1] = (ha + hb) * (2.0 * ha + hb) / ha;

        // Thomas algorithm
        for k in 1..m {
            let w = lower[k] / diag[k - 1];
            diag[k] -= w * upper[k - 1];
            rhs[k] -= w * rhs[k - 1];
        }
        let mut c = vec![0.0; n];
        c[m] = rhs[m - 1] / diag[m - 1];
        for k in (0..m - 1).rev() {
            c[k + 1] = (rhs[k] - upper[k] * c[k + 2]) / diag[k];
        }
        c[0] = ((h0 + h1) * c[1] - h0 * c[2]) / h1;
        c[n - 1] = ((ha + hb) * c[n - 2] - hb * c[n - 3]) / ha;

        let coeffs = (0..n - 1)
            .map(|j| {
                let b = slope[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
                let d = (c[j + 1] - c[j]) / (3.0 * h[j]);
                [y[j], b, c[j], d]
            })
            .collect();

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            coeffs,
        })
    }

    pub(super) fn x_min(&self) -> f64 {
        self.x[0]
    }

    pub(super) fn x_max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    pub(super) fn evaluate(&self, x: f64) -> Result<f64, FilterError> {
        if !(x >= self.x_min() && x <= self.x_max()) {
            return Err(FilterError::OutOfRange {
                wl: x,
                wl_min: self.x_min(),
                wl_max: self.x_max(),
            });
        }
        // Number of nodes not above x, at least one after the range check
        let i = self.x.partition_point(|&v| v <= x);
        if self.x[i - 1] == x {
            return Ok(self.y[i - 1]);
        }
        let segment = i - 1;
        let dx = x - self.x[segment];
        let [a, b, c, d] = self.coeffs[segment];
        Ok(a + dx * (b + dx * (c + dx * d)))
    }
}
