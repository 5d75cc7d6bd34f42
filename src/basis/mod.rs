//! Orthogonal polynomial design matrices for light-curve baselines

mod builder;
pub use builder::{BasisBuilder, LegendreBasis, WindowMode};

mod legendre;
pub use legendre::legendre_vander;
