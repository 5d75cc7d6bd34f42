use crate::baseline::config::LegendreBaselineConfig;
use crate::basis::{BasisBuilder, LegendreBasis};
use crate::data::LightCurveSet;
use crate::error::{BaselineError, ConfigurationError, ParameterError, ShapeMismatchError};
use crate::parameters::{BlockHandle, ParameterSpace};

use log::debug;
use ndarray::linalg::general_mat_mul;
use ndarray::{
    Array1, Array2, ArrayBase, ArrayView2, Axis, Data, DataMut, Dimension, Ix1, Ix2, s,
};

/// Multiplicative light-curve baseline modelled by Legendre polynomials in normalised time
///
/// The baseline of light curve `i` is
/// $$
/// b_i(t) = c_{i,0} + \sum_{k=1}^{n} c_{i,k} P_k\left(\frac{t - \bar t_i}{w}\right),
/// $$
/// where $n$ is `nlegendre`, $\bar t_i$ is the mean time of the light curve and $w$ is the
/// peak-to-peak range of all mean-centred light curves together (see [`crate::WindowMode`]).
/// Coefficients $c_{i,k}$ live in a block of the shared parameter vector registered by
/// [`LegendreBaseline::setup`].
///
/// The basis matrices are built once in `setup` and only read by evaluation, so a set-up
/// baseline can be shared between threads.
#[derive(Clone, Debug)]
pub struct LegendreBaseline {
    config: LegendreBaselineConfig,
    state: Option<BaselineState>,
}

#[derive(Clone, Debug)]
struct BaselineState {
    light_curves: LightCurveSet,
    basis: LegendreBasis,
    block: BlockHandle,
    n_parameters: usize,
}

impl LegendreBaseline {
    pub fn new(config: LegendreBaselineConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn with_nlegendre(nlegendre: usize) -> Self {
        Self::new(LegendreBaselineConfig::new(nlegendre))
    }

    pub fn config(&self) -> &LegendreBaselineConfig {
        &self.config
    }

    #[inline]
    pub fn nlegendre(&self) -> usize {
        self.config.nlegendre
    }

    pub fn is_set_up(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> Result<&BaselineState, ShapeMismatchError> {
        self.state.as_ref().ok_or(ShapeMismatchError::NotSetUp)
    }

    pub fn light_curves(&self) -> Option<&LightCurveSet> {
        self.state.as_ref().map(|s| &s.light_curves)
    }

    pub fn basis(&self) -> Option<&LegendreBasis> {
        self.state.as_ref().map(|s| &s.basis)
    }

    /// Parameter block registered by [`LegendreBaseline::setup`]
    pub fn block(&self) -> Option<&BlockHandle> {
        self.state.as_ref().map(|s| &s.block)
    }

    /// Length of the parameter vector expected by evaluation
    pub fn n_parameters(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.n_parameters)
    }

    /// Build the basis and register the baseline parameter block
    ///
    /// `times` and `fluxes` hold one sequence per light curve. The block gets
    /// `n_curves * (nlegendre + 1)` parameters, see [`LegendreBaselineConfig::declarations`].
    pub fn setup<T, F>(
        &mut self,
        times: &[T],
        fluxes: &[F],
        parameter_space: &mut ParameterSpace,
    ) -> Result<(), BaselineError>
    where
        T: AsRef<[f64]>,
        F: AsRef<[f64]>,
    {
        let light_curves = LightCurveSet::new(times, fluxes)?;
        self.setup_light_curves(light_curves, parameter_space)
    }

    pub fn setup_light_curves(
        &mut self,
        light_curves: LightCurveSet,
        parameter_space: &mut ParameterSpace,
    ) -> Result<(), BaselineError> {
        let basis = self.build_basis(&light_curves)?;
        let block = parameter_space.add_block(
            self.config.block_name.clone(),
            self.config.size_per_curve(),
            light_curves.n_curves(),
            self.config.declarations(light_curves.n_curves()),
        )?;
        debug!(
            "Legendre baseline set up: {} light curves, {} points, block {:?}",
            light_curves.n_curves(),
            light_curves.n_points(),
            block.slice(),
        );
        self.state = Some(BaselineState {
            light_curves,
            basis,
            block,
            n_parameters: parameter_space.len(),
        });
        Ok(())
    }

    fn build_basis(&self, light_curves: &LightCurveSet) -> Result<LegendreBasis, BaselineError> {
        BasisBuilder::new(self.config.nlegendre)
            .with_window_mode(self.config.window_mode)
            .build(&light_curves.times())
    }

    /// Replace the light curves keeping the registered parameter block
    ///
    /// The number of light curves must not change.
    pub fn rebuild(&mut self, light_curves: LightCurveSet) -> Result<(), BaselineError> {
        let n_curves = self.state()?.block.n_curves();
        if light_curves.n_curves() != n_curves {
            return Err(ConfigurationError::CurveCountChanged {
                expected: n_curves,
                actual: light_curves.n_curves(),
            }
            .into());
        }
        let basis = self.build_basis(&light_curves)?;
        if let Some(state) = self.state.as_mut() {
            state.light_curves = light_curves;
            state.basis = basis;
        }
        Ok(())
    }

    /// Update the expected parameter vector length after more blocks are registered
    ///
    /// The parameter space must hold the block registered by [`LegendreBaseline::setup`] at the
    /// same position.
    pub fn sync_parameter_space(
        &mut self,
        parameter_space: &ParameterSpace,
    ) -> Result<(), BaselineError> {
        let state = self.state.as_mut().ok_or(ShapeMismatchError::NotSetUp)?;
        if parameter_space.block(state.block.name()) != Some(&state.block)
            || parameter_space.len() < state.block.slice().end
        {
            return Err(ParameterError::MissingBlock(state.block.name().to_owned()).into());
        }
        state.n_parameters = parameter_space.len();
        Ok(())
    }

    /// Evaluate baselines for a batch of parameter vectors
    ///
    /// `param_batch` is either a `(B, P)` matrix with one parameter vector per row or a single
    /// parameter vector of length `P`, treated as a batch of one. The result has shape `(B, T)`,
    /// where `T` is the total number of observations, columns follow
    /// [`LightCurveSet::slices`].
    pub fn evaluate<S, D>(&self, param_batch: &ArrayBase<S, D>) -> Result<Array2<f64>, BaselineError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let state = self.state()?;
        let batch = as_batch(param_batch)?;
        let mut out = Array2::zeros((batch.nrows(), state.light_curves.n_points()));
        self.evaluate_batch(state, batch, &mut out)?;
        Ok(out)
    }

    /// Same as [`LegendreBaseline::evaluate`] but writes into a pre-allocated `(B, T)` array
    pub fn evaluate_into<S, D, So>(
        &self,
        param_batch: &ArrayBase<S, D>,
        out: &mut ArrayBase<So, Ix2>,
    ) -> Result<(), BaselineError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
        So: DataMut<Elem = f64>,
    {
        let state = self.state()?;
        let batch = as_batch(param_batch)?;
        let expected = (batch.nrows(), state.light_curves.n_points());
        if out.dim() != expected {
            return Err(ShapeMismatchError::OutputShape {
                expected,
                actual: out.dim(),
            }
            .into());
        }
        self.evaluate_batch(state, batch, out)
    }

    fn evaluate_batch<So>(
        &self,
        state: &BaselineState,
        batch: ArrayView2<f64>,
        out: &mut ArrayBase<So, Ix2>,
    ) -> Result<(), BaselineError>
    where
        So: DataMut<Elem = f64>,
    {
        if batch.ncols() != state.n_parameters {
            return Err(ShapeMismatchError::ParameterCount {
                expected: state.n_parameters,
                actual: batch.ncols(),
            }
            .into());
        }
        let size = state.block.size_per_curve();
        let slices = state.light_curves.slices();
        for (i, (basis, range)) in state.basis.bases().iter().zip(slices).enumerate() {
            let start = state.block.start() + i * size;
            let coeffs = batch.slice(s![.., start..start + size]);
            let mut target = out.slice_mut(s![.., range.clone()]);
            general_mat_mul(1.0, &coeffs, &basis.t(), 0.0, &mut target);
        }
        Ok(())
    }

    /// Baseline of a single light curve at arbitrary time stamps
    ///
    /// Useful to draw a smooth baseline model between observations.
    pub fn evaluate_curve_at<S, St>(
        &self,
        pv: &ArrayBase<S, Ix1>,
        curve: usize,
        times: &ArrayBase<St, Ix1>,
    ) -> Result<Array1<f64>, BaselineError>
    where
        S: Data<Elem = f64>,
        St: Data<Elem = f64>,
    {
        let state = self.state()?;
        if pv.len() != state.n_parameters {
            return Err(ShapeMismatchError::ParameterCount {
                expected: state.n_parameters,
                actual: pv.len(),
            }
            .into());
        }
        let coeff_range =
            state
                .block
                .curve_slice(curve)
                .ok_or(ConfigurationError::NoSuchLightCurve {
                    index: curve,
                    n_curves: state.block.n_curves(),
                })?;
        let vander = state.basis.vander_at(curve, times)?;
        Ok(vander.dot(&pv.slice(s![coeff_range])))
    }

    /// Observed fluxes divided by the baseline of a single parameter vector
    pub fn detrend<S>(&self, pv: &ArrayBase<S, Ix1>) -> Result<Array1<f64>, BaselineError>
    where
        S: Data<Elem = f64>,
    {
        let state = self.state()?;
        let baseline = self.evaluate(pv)?;
        Ok(&state.light_curves.fluxa() / &baseline.row(0))
    }
}

/// Promote a parameter vector or matrix to a two-dimensional batch view
fn as_batch<S, D>(param_batch: &ArrayBase<S, D>) -> Result<ArrayView2<'_, f64>, ShapeMismatchError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let view = param_batch.view();
    let ndim = view.ndim();
    let batch = match ndim {
        1 => view
            .into_dimensionality::<Ix1>()
            .map(|pv| pv.insert_axis(Axis(0))),
        2 => view.into_dimensionality::<Ix2>(),
        _ => return Err(ShapeMismatchError::Dimensionality { ndim }),
    };
    batch.map_err(|_| ShapeMismatchError::Dimensionality { ndim })
}
