//! Flat parameter vector shared by all model components

mod bounds;
pub use bounds::Bounds;

mod declaration;
pub use declaration::ParameterDeclaration;

pub mod prior;
pub use prior::{Prior, PriorTrait};

mod space;
pub use space::{BlockHandle, ParameterSpace};
