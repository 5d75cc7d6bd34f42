use crate::parameters::bounds::Bounds;
use crate::parameters::prior::Prior;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declaration of a single scalar parameter of the model
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ParameterDeclaration {
    /// Unique short identifier, e.g. `bli_0`
    pub id: String,
    /// Human-readable label, e.g. `bl_intercept_0`
    pub label: String,
    pub unit: String,
    pub prior: Prior,
    pub bounds: Bounds,
}

impl ParameterDeclaration {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        prior: Prior,
        bounds: impl Into<Bounds>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            unit: unit.into(),
            prior,
            bounds: bounds.into(),
        }
    }
}
