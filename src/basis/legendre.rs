use ndarray::{Array2, ArrayBase, Data, Ix1, Zip, s};

/// Legendre pseudo-Vandermonde matrix
///
/// Returns an `(x.len(), degree + 1)` matrix whose `k`-th column is the Legendre polynomial
/// $P_k$ evaluated at `x`. Columns are produced by Bonnet's recursion
/// $k P_k(x) = (2k - 1) x P_{k-1}(x) - (k - 1) P_{k-2}(x)$, the zeroth column is exactly one.
pub fn legendre_vander<S>(x: &ArrayBase<S, Ix1>, degree: usize) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut v = Array2::zeros((x.len(), degree + 1));
    v.column_mut(0).fill(1.0);
    if degree >= 1 {
        v.column_mut(1).assign(x);
    }
    for k in 2..=degree {
        let (previous, mut current) = v.multi_slice_mut((s![.., k - 2..k], s![.., k]));
        let a = (2 * k - 1) as f64;
        let b = (k - 1) as f64;
        let c = k as f64;
        Zip::from(&mut current)
            .and(previous.column(1))
            .and(previous.column(0))
            .and(x)
            .for_each(|p, &p1, &p2, &x| *p = (p1 * x * a - p2 * b) / c);
    }
    v
}
