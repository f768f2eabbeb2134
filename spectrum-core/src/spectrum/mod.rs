//! Spectral analysis via direct Fourier projection onto musical bins

pub mod analysis;
pub mod frequency;
pub mod projection;

pub use analysis::{AnalyzerConfig, ConfigError, SpectrumAnalyzer, DB_FLOOR};
pub use frequency::{build_frequency_space, OctaveDivisions};
pub use projection::ProjectionMatrix;
