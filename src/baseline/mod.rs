mod config;
pub use config::LegendreBaselineConfig;

mod legendre_baseline;
pub use legendre_baseline::LegendreBaseline;
