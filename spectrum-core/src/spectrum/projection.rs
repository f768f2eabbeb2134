//! Precomputed direct Fourier projection matrix
//!
//! A bank of complex exponential correlators, one row per target
//! frequency. The target frequencies are musically spaced, so they do
//! not land on a uniform FFT bin grid; a direct projection at the exact
//! frequencies avoids interpolating an FFT output. Building the matrix
//! is O(bins x window) and happens once; every analysis frame reuses it
//! read-only.

use ndarray::{Array2, ArrayView1};
use num_complex::Complex;
use std::f64::consts::PI;

/// Dense complex projection basis, shape `num_bins x window_len`
///
/// Entry `(f, t) = exp(-i * 2π * freq[f] * t * dt) / window_len` with
/// `dt = 1/sample_rate`. The `1/window_len` normalization keeps output
/// magnitudes comparable across window lengths.
pub struct ProjectionMatrix {
    coefficients: Array2<Complex<f64>>,
}

impl ProjectionMatrix {
    /// Build the projection matrix for a frequency set
    ///
    /// # Arguments
    /// * `frequencies` - Target analysis frequencies in Hz
    /// * `sample_rate` - Sample rate in Hz
    /// * `window_len` - Analysis window length in samples
    pub fn build(frequencies: &[f64], sample_rate: f64, window_len: usize) -> Self {
        let dt = 1.0 / sample_rate;
        let scale = 1.0 / window_len as f64;

        let coefficients = Array2::from_shape_fn((frequencies.len(), window_len), |(f, t)| {
            let phase = -2.0 * PI * frequencies[f] * t as f64 * dt;
            Complex::from_polar(scale, phase)
        });

        Self { coefficients }
    }

    /// Number of frequency bins (rows)
    pub fn num_bins(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Analysis window length in samples (columns)
    pub fn window_len(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Correlator coefficients for one frequency bin
    pub fn row(&self, bin: usize) -> ArrayView1<'_, Complex<f64>> {
        self.coefficients.row(bin)
    }
}
