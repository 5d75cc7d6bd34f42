use crate::filter::filter_trait::*;

/// Unity transmission at every wavelength
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClearFilter {
    pub name: String,
}

impl ClearFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ClearFilter {
    fn default() -> Self {
        Self::new("clear")
    }
}

impl FilterTrait for ClearFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn wl_range(&self) -> (f64, f64) {
        (DEFAULT_WL_MIN, DEFAULT_WL_MAX)
    }

    fn transmission(&self, _wl: f64) -> Result<f64, FilterError> {
        Ok(1.0)
    }
}
