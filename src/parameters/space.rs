use crate::error::ParameterError;
use crate::parameters::bounds::{Bounds, within_bounds};
use crate::parameters::declaration::ParameterDeclaration;
use crate::parameters::prior::PriorTrait;

use log::trace;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, DataMut, Ix1, Ix2};
use rand::{Rng, RngCore};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// Number of prior draws tried before falling back to clamping into the bounds
const MAX_PRIOR_DRAWS: usize = 1000;

/// Contiguous named region of the parameter vector
///
/// Parameters of a block are grouped per light curve: the block holds `n_curves` groups of
/// `size_per_curve` parameters.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    name: String,
    start: usize,
    size_per_curve: usize,
    n_curves: usize,
}

impl BlockHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute offset of the first parameter of the block
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn size_per_curve(&self) -> usize {
        self.size_per_curve
    }

    #[inline]
    pub fn n_curves(&self) -> usize {
        self.n_curves
    }

    /// Total number of parameters in the block
    #[inline]
    pub fn len(&self) -> usize {
        self.size_per_curve * self.n_curves
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute index range of the block in the parameter vector
    pub fn slice(&self) -> Range<usize> {
        self.start..self.start + self.len()
    }

    /// Absolute index range of the parameters of light curve `curve`
    pub fn curve_slice(&self, curve: usize) -> Option<Range<usize>> {
        (curve < self.n_curves).then(|| {
            let start = self.start + curve * self.size_per_curve;
            start..start + self.size_per_curve
        })
    }
}

/// Registry of model parameters laid out in one flat parameter vector
///
/// Blocks are appended contiguously in the order of registration. The registry stores
/// declarations only, parameter values are owned by the caller (sampler or optimizer).
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ParameterSpace {
    declarations: Vec<ParameterDeclaration>,
    blocks: Vec<BlockHandle>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block of `size_per_curve * n_curves` parameters
    ///
    /// `declarations` are ordered by light curve first: all parameters of curve 0, then all
    /// parameters of curve 1, etc.
    pub fn add_block(
        &mut self,
        name: impl Into<String>,
        size_per_curve: usize,
        n_curves: usize,
        declarations: Vec<ParameterDeclaration>,
    ) -> Result<BlockHandle, ParameterError> {
        let name = name.into();
        if self.block(&name).is_some() {
            return Err(ParameterError::DuplicateBlock(name));
        }
        let expected = size_per_curve * n_curves;
        if declarations.len() != expected {
            return Err(ParameterError::DeclarationCount {
                name,
                expected,
                actual: declarations.len(),
            });
        }

        let mut ids: HashSet<&str> = self.declarations.iter().map(|d| d.id.as_str()).collect();
        for d in &declarations {
            if !ids.insert(d.id.as_str()) {
                return Err(ParameterError::DuplicateId(d.id.clone()));
            }
            if !d.bounds.is_valid() {
                return Err(ParameterError::InvalidBounds {
                    id: d.id.clone(),
                    lower: d.bounds.lower,
                    upper: d.bounds.upper,
                });
            }
        }

        let block = BlockHandle {
            name,
            start: self.declarations.len(),
            size_per_curve,
            n_curves,
        };
        trace!(
            "Parameter block {:?} registered at {:?}",
            block.name,
            block.slice()
        );
        self.declarations.extend(declarations);
        self.blocks.push(block.clone());
        Ok(block)
    }

    /// Length of the parameter vector
    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn blocks(&self) -> &[BlockHandle] {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&BlockHandle> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn declarations(&self) -> &[ParameterDeclaration] {
        &self.declarations
    }

    pub fn ids(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.label.as_str()).collect()
    }

    /// Position of the parameter with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.declarations.iter().position(|d| d.id == id)
    }

    pub fn bounds(&self) -> Vec<Bounds> {
        self.declarations.iter().map(|d| d.bounds).collect()
    }

    pub fn lower_bounds(&self) -> Array1<f64> {
        self.declarations.iter().map(|d| d.bounds.lower).collect()
    }

    pub fn upper_bounds(&self) -> Array1<f64> {
        self.declarations.iter().map(|d| d.bounds.upper).collect()
    }

    fn check_len(&self, len: usize) -> Result<(), ParameterError> {
        if len == self.len() {
            Ok(())
        } else {
            Err(ParameterError::VectorLength {
                expected: self.len(),
                actual: len,
            })
        }
    }

    pub fn within_bounds<S>(&self, pv: &ArrayBase<S, Ix1>) -> Result<bool, ParameterError>
    where
        S: Data<Elem = f64>,
    {
        self.check_len(pv.len())?;
        Ok(within_bounds(
            pv.iter(),
            self.declarations.iter().map(|d| &d.bounds),
        ))
    }

    /// Sum of log-priors of all parameters, negative infinity outside the bounds
    pub fn ln_prior<S>(&self, pv: &ArrayBase<S, Ix1>) -> Result<f64, ParameterError>
    where
        S: Data<Elem = f64>,
    {
        self.check_len(pv.len())?;
        Ok(self.ln_prior_unchecked(pv))
    }

    fn ln_prior_unchecked<S>(&self, pv: &ArrayBase<S, Ix1>) -> f64
    where
        S: Data<Elem = f64>,
    {
        let mut total = 0.0;
        for (&x, d) in pv.iter().zip(&self.declarations) {
            if !d.bounds.contains(x) {
                return f64::NEG_INFINITY;
            }
            total += d.prior.ln_prior(x, None);
        }
        total
    }

    /// Log-priors of every row of a parameter batch
    pub fn ln_prior_batch<S>(&self, pvp: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ParameterError>
    where
        S: Data<Elem = f64>,
    {
        self.check_len(pvp.ncols())?;
        Ok(pvp
            .outer_iter()
            .map(|pv| self.ln_prior_unchecked(&pv))
            .collect())
    }

    /// Prior means, or bound midpoints for improper priors
    ///
    /// Values are clamped into the bounds, an unbounded parameter with an improper prior gets zero.
    pub fn prior_means(&self) -> Array1<f64> {
        self.declarations
            .iter()
            .map(|d| {
                let x = d
                    .prior
                    .mean()
                    .or_else(|| d.bounds.midpoint())
                    .unwrap_or(0.0);
                d.bounds.clamp(x)
            })
            .collect()
    }

    /// Draw `n` parameter vectors from the priors, returned as a `(n, len())` batch
    ///
    /// Draws are repeated until they fall into the bounds. Parameters with improper priors are
    /// drawn uniformly within finite bounds.
    pub fn sample_from_prior<R>(&self, rng: &mut R, n: usize) -> Array2<f64>
    where
        R: RngCore,
    {
        let mut pvp = Array2::zeros((n, self.len()));
        for (mut column, d) in pvp.axis_iter_mut(Axis(1)).zip(&self.declarations) {
            for x in column.iter_mut() {
                *x = sample_declaration(d, rng);
            }
        }
        pvp
    }

    /// Clamp every row of a parameter batch into the bounds in place
    pub fn clamp_batch<S>(&self, pvp: &mut ArrayBase<S, Ix2>) -> Result<(), ParameterError>
    where
        S: DataMut<Elem = f64>,
    {
        self.check_len(pvp.ncols())?;
        for mut pv in pvp.outer_iter_mut() {
            for (x, d) in pv.iter_mut().zip(&self.declarations) {
                *x = d.bounds.clamp(*x);
            }
        }
        Ok(())
    }
}

fn sample_declaration<R: RngCore>(d: &ParameterDeclaration, rng: &mut R) -> f64 {
    for _ in 0..MAX_PRIOR_DRAWS {
        let x = match d.prior.sample(&mut *rng) {
            Some(x) => x,
            None if d.bounds.is_finite() => rng.random_range(d.bounds.lower..=d.bounds.upper),
            None => return d.bounds.clamp(0.0),
        };
        if d.bounds.contains(x) {
            return x;
        }
    }
    d.bounds.clamp(d.prior.mean().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parameters::prior::Prior;

    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn declarations(prefix: &str, n: usize) -> Vec<ParameterDeclaration> {
        (0..n)
            .map(|i| {
                ParameterDeclaration::new(
                    format!("{prefix}_{i}"),
                    format!("{prefix} number {i}"),
                    "",
                    Prior::normal(0.0, 1.0),
                    (-5.0, 5.0),
                )
            })
            .collect()
    }

    #[test]
    fn blocks_are_contiguous() {
        let mut ps = ParameterSpace::new();
        let a = ps.add_block("a", 1, 3, declarations("a", 3)).unwrap();
        let b = ps.add_block("b", 2, 2, declarations("b", 4)).unwrap();

        assert_eq!(a.slice(), 0..3);
        assert_eq!(b.start(), 3);
        assert_eq!(b.slice(), 3..7);
        assert_eq!(b.curve_slice(1), Some(5..7));
        assert_eq!(b.curve_slice(2), None);
        assert_eq!(ps.len(), 7);
        assert_eq!(ps.block("b"), Some(&b));
        assert_eq!(ps.index_of("b_2"), Some(5));
        assert_eq!(ps.ids()[3..], ["b_0", "b_1", "b_2", "b_3"]);
    }

    #[test]
    fn duplicate_block() {
        let mut ps = ParameterSpace::new();
        ps.add_block("a", 1, 1, declarations("a", 1)).unwrap();
        assert_eq!(
            ps.add_block("a", 1, 1, declarations("other", 1)),
            Err(ParameterError::DuplicateBlock("a".to_owned()))
        );
        assert_eq!(ps.len(), 1);
    }

    #[test]
    fn duplicate_id() {
        let mut ps = ParameterSpace::new();
        ps.add_block("a", 1, 2, declarations("x", 2)).unwrap();
        assert_eq!(
            ps.add_block("b", 1, 1, declarations("x", 1)),
            Err(ParameterError::DuplicateId("x_0".to_owned()))
        );
    }

    #[test]
    fn wrong_declaration_count() {
        let mut ps = ParameterSpace::new();
        assert_eq!(
            ps.add_block("a", 2, 3, declarations("a", 5)),
            Err(ParameterError::DeclarationCount {
                name: "a".to_owned(),
                expected: 6,
                actual: 5
            })
        );
        assert!(ps.is_empty());
    }

    #[test]
    fn invalid_bounds() {
        let mut ps = ParameterSpace::new();
        let d = vec![ParameterDeclaration::new(
            "p",
            "p",
            "",
            Prior::none(),
            (1.0, -1.0),
        )];
        assert_eq!(
            ps.add_block("a", 1, 1, d),
            Err(ParameterError::InvalidBounds {
                id: "p".to_owned(),
                lower: 1.0,
                upper: -1.0
            })
        );
    }

    #[test]
    fn ln_prior_sums_components() {
        let mut ps = ParameterSpace::new();
        ps.add_block("a", 2, 1, declarations("a", 2)).unwrap();
        let ln_norm = -0.5 * f64::ln(std::f64::consts::TAU);

        let pv = array![1.0, -2.0];
        assert_relative_eq!(
            ps.ln_prior(&pv).unwrap(),
            2.0 * ln_norm - 0.5 * (1.0 + 4.0),
            epsilon = 1e-14
        );
        assert_eq!(ps.ln_prior(&array![6.0, 0.0]).unwrap(), f64::NEG_INFINITY);
        assert_eq!(
            ps.ln_prior(&array![0.0]),
            Err(ParameterError::VectorLength {
                expected: 2,
                actual: 1
            })
        );

        let batch = array![[1.0, -2.0], [0.0, 0.0], [0.0, 10.0]];
        let ln_p = ps.ln_prior_batch(&batch).unwrap();
        assert_relative_eq!(ln_p[0], 2.0 * ln_norm - 2.5, epsilon = 1e-14);
        assert_relative_eq!(ln_p[1], 2.0 * ln_norm, epsilon = 1e-14);
        assert_eq!(ln_p[2], f64::NEG_INFINITY);
    }

    #[test]
    fn means_and_bounds() {
        let mut ps = ParameterSpace::new();
        let d = vec![
            ParameterDeclaration::new("n", "n", "", Prior::normal(7.0, 1.0), (-1.0, 1.0)),
            ParameterDeclaration::new("u", "u", "", Prior::none(), (2.0, 4.0)),
            ParameterDeclaration::new("f", "f", "", Prior::none(), Bounds::unbounded()),
        ];
        ps.add_block("a", 3, 1, d).unwrap();

        assert_eq!(ps.prior_means(), array![1.0, 3.0, 0.0]);
        assert_eq!(ps.lower_bounds(), array![-1.0, 2.0, f64::NEG_INFINITY]);
        assert_eq!(ps.upper_bounds(), array![1.0, 4.0, f64::INFINITY]);
        assert!(ps.within_bounds(&array![0.0, 2.5, 1e300]).unwrap());
        assert!(!ps.within_bounds(&array![0.0, 1.5, 0.0]).unwrap());

        let mut batch = array![[-3.0, 5.0, 1.0]];
        ps.clamp_batch(&mut batch).unwrap();
        assert_eq!(batch, array![[-1.0, 4.0, 1.0]]);
    }

    #[test]
    fn prior_samples_within_bounds() {
        let mut ps = ParameterSpace::new();
        let d = vec![
            ParameterDeclaration::new("i", "i", "", Prior::normal(1.0, 0.01), (0.98, 1.02)),
            ParameterDeclaration::new("c", "c", "", Prior::normal(0.0, 0.5), (-0.1, 0.1)),
            ParameterDeclaration::new("u", "u", "", Prior::none(), (2.0, 4.0)),
        ];
        ps.add_block("a", 3, 1, d).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let pvp = ps.sample_from_prior(&mut rng, 500);
        assert_eq!(pvp.dim(), (500, 3));
        for pv in pvp.outer_iter() {
            assert!(ps.within_bounds(&pv).unwrap());
        }
        assert!(ps.ln_prior_batch(&pvp).unwrap().iter().all(|x| x.is_finite()));
    }
}
