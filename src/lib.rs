#![doc = include_str!("../README.md")]


#[macro_use]
mod macros;

mod baseline;
pub use baseline::{LegendreBaseline, LegendreBaselineConfig};

mod basis;
pub use basis::{BasisBuilder, LegendreBasis, WindowMode, legendre_vander};

mod data;
pub use data::{LightCurve, LightCurveSet};

mod error;
pub use error::{BaselineError, ConfigurationError, FilterError, ParameterError, ShapeMismatchError};

pub mod filter;
pub use filter::{BoxcarFilter, ClearFilter, Filter, FilterTrait, TabulatedFilter};

pub mod parameters;
pub use parameters::{BlockHandle, Bounds, ParameterDeclaration, ParameterSpace, Prior, PriorTrait};

pub use ndarray;
