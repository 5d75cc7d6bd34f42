pub use lc_data::ALL_LIGHT_CURVES;
pub use lc_data::embedded::{EMBEDDED_LIGHT_CURVES, embedded_light_curves, iter_embedded_light_curves};
pub use lc_data::synthetic::{SYNTHETIC_LIGHT_CURVES, SyntheticLightCurves, synthetic_light_curves};
pub use lc_data::types::SectorLightCurves;

mod lc_data;
