//! Chroma Scope - Real-Time Musical Spectrum Analysis Core
//!
//! Projects live audio onto a bank of logarithmically (musically) spaced
//! frequency bins via a precomputed direct Fourier projection matrix and
//! reports per-bin magnitude in decibels.

pub mod audio;
pub mod render;
pub mod spectrum;

pub use audio::{AudioInput, CaptureRingBuffer, SlidingWindow};
pub use render::DbRange;
pub use spectrum::{build_frequency_space, AnalyzerConfig, OctaveDivisions, SpectrumAnalyzer};
