/// Error returned from [crate::LegendreBaseline] and [crate::BasisBuilder]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BaselineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("time window {window} is degenerate")]
    DegenerateWindow { window: f64 },

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least one light curve is required")]
    NoLightCurves,

    #[error("{n_times} time arrays are given but {n_fluxes} flux arrays")]
    LightCurveCountMismatch { n_times: usize, n_fluxes: usize },

    #[error("light curve {index} is empty")]
    EmptyLightCurve { index: usize },

    #[error("light curve {index} has {n_times} time stamps but {n_fluxes} flux values")]
    LengthMismatch {
        index: usize,
        n_times: usize,
        n_fluxes: usize,
    },

    #[error("light curve {index} has a non-finite time stamp at position {position}")]
    NonFiniteTime { index: usize, position: usize },

    #[error("light curve index {index} is out of range for {n_curves} light curves")]
    NoSuchLightCurve { index: usize, n_curves: usize },

    #[error("baseline is set up for {expected} light curves, {actual} are given")]
    CurveCountChanged { expected: usize, actual: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeMismatchError {
    #[error("baseline is not set up, call setup() before evaluation")]
    NotSetUp,

    #[error("parameter batch has {actual} columns, but the parameter vector length is {expected}")]
    ParameterCount { expected: usize, actual: usize },

    #[error("parameter batch must be one- or two-dimensional, got {ndim} dimensions")]
    Dimensionality { ndim: usize },

    #[error("output array has shape {actual:?}, but {expected:?} is required")]
    OutputShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Error returned from [crate::ParameterSpace]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParameterError {
    #[error("block {0:?} is already registered")]
    DuplicateBlock(String),

    #[error("block {0:?} is not registered in this parameter space")]
    MissingBlock(String),

    #[error("parameter id {0:?} is already registered")]
    DuplicateId(String),

    #[error("block {name:?} expects {expected} declarations, {actual} are given")]
    DeclarationCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid prior: {0}")]
    InvalidPrior(&'static str),

    #[error("parameter {id:?} has invalid bounds [{lower}, {upper}]")]
    InvalidBounds { id: String, lower: f64, upper: f64 },

    #[error("parameter vector has length {actual}, but {expected} is required")]
    VectorLength { expected: usize, actual: usize },
}

/// Error returned from [crate::Filter] construction and evaluation
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FilterError {
    #[error("wavelength and transmission arrays must have the same size, got {n_wl} and {n_tm}")]
    SizeMismatch { n_wl: usize, n_tm: usize },

    #[error("at least four tabulated points are required, got {0}")]
    TooFewPoints(usize),

    #[error("wavelength array must be strictly increasing")]
    Unsorted,

    #[error("transmission must be within [0, 1], got {0}")]
    TransmissionRange(f64),

    #[error("invalid wavelength range [{wl_min}, {wl_max}]")]
    InvalidRange { wl_min: f64, wl_max: f64 },

    #[error("wavelength {wl} is outside the tabulated range [{wl_min}, {wl_max}]")]
    OutOfRange { wl: f64, wl_min: f64, wl_max: f64 },

    #[error("at least two sample points are required, got {0}")]
    SampleSize(usize),
}
