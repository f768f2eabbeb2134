//! Per-frame amplitude estimation over the projection basis
//!
//! Combines the frequency space and projection matrix into an analyzer
//! that turns a window of time-domain samples into per-bin decibels.

use super::frequency::{build_frequency_space, OctaveDivisions};
use super::projection::ProjectionMatrix;
use num_complex::Complex;
use thiserror::Error;

/// Decibel value reported for a bin with no measurable energy
///
/// Power is clamped to 1e-20 before the log, so an all-zero window
/// yields this value instead of -inf.
pub const DB_FLOOR: f64 = -200.0;

const POWER_FLOOR: f64 = 1e-20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Base frequency must be positive (got {0} Hz)")]
    NonPositiveBaseFrequency(f64),

    #[error("Sample rate must be positive (got {0} Hz)")]
    NonPositiveSampleRate(f64),

    #[error("Number of frequency bins must be nonzero")]
    ZeroBins,

    #[error("Analysis window length must be nonzero")]
    ZeroWindow,
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Frequency of the lowest bin in Hz
    pub base_frequency: f64,

    /// Number of frequency bins
    pub num_bins: usize,

    /// Octave subdivision for bin spacing
    pub divisions: OctaveDivisions,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Analysis window length in samples
    pub window_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_frequency: 52.5,
            num_bins: 60,
            divisions: OctaveDivisions::Semitone,
            sample_rate: 48000.0,
            window_len: 1024,
        }
    }
}

impl AnalyzerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_frequency > 0.0) {
            return Err(ConfigError::NonPositiveBaseFrequency(self.base_frequency));
        }
        if !(self.sample_rate > 0.0) {
            return Err(ConfigError::NonPositiveSampleRate(self.sample_rate));
        }
        if self.num_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if self.window_len == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(())
    }
}

/// Real-time spectrum analyzer over musically spaced bins
///
/// Owns the frequency set and projection matrix, both immutable after
/// construction; `estimate_into` only reads them, so a `&SpectrumAnalyzer`
/// may be shared across threads without locking.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    frequencies: Vec<f64>,
    matrix: ProjectionMatrix,
}

impl SpectrumAnalyzer {
    /// Create new analyzer, building the projection matrix
    ///
    /// Validates the configuration; matrix construction cost is
    /// O(num_bins x window_len), paid once here.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let frequencies =
            build_frequency_space(config.base_frequency, config.num_bins, config.divisions);
        let matrix = ProjectionMatrix::build(&frequencies, config.sample_rate, config.window_len);

        Ok(Self {
            config,
            frequencies,
            matrix,
        })
    }

    /// Estimate per-bin amplitude in dB, writing into a caller buffer
    ///
    /// # Arguments
    /// * `samples` - Sample block of exactly `window_len()` samples
    /// * `amplitudes` - Output, exactly `num_bins()` entries, fully overwritten
    ///
    /// Squared magnitude is taken before the single log10, skipping the
    /// square root a magnitude-then-square formulation would pay per bin.
    /// Output is unclamped above the floor; mapping dB onto a display
    /// range is the renderer's job.
    pub fn estimate_into(&self, samples: &[f64], amplitudes: &mut [f64]) {
        assert_eq!(samples.len(), self.matrix.window_len());
        assert_eq!(amplitudes.len(), self.matrix.num_bins());

        for (bin, out) in amplitudes.iter_mut().enumerate() {
            let amplitude: Complex<f64> = samples
                .iter()
                .zip(self.matrix.row(bin))
                .map(|(&s, c)| c * s)
                .sum();

            let power = (amplitude * amplitude.conj()).re.max(POWER_FLOOR);
            *out = 10.0 * power.log10();
        }
    }

    /// Estimate per-bin amplitude in dB, allocating the output
    pub fn estimate_amplitudes(&self, samples: &[f64]) -> Vec<f64> {
        let mut amplitudes = vec![0.0; self.matrix.num_bins()];
        self.estimate_into(samples, &mut amplitudes);
        amplitudes
    }

    /// Target analysis frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.matrix.num_bins()
    }

    /// Analysis window length in samples
    pub fn window_len(&self) -> usize {
        self.matrix.window_len()
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cosine_block(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|t| (2.0 * PI * freq_hz * t as f64 / sample_rate).cos())
            .collect()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad_base = AnalyzerConfig {
            base_frequency: -10.0,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            SpectrumAnalyzer::new(bad_base),
            Err(ConfigError::NonPositiveBaseFrequency(_))
        ));

        let bad_window = AnalyzerConfig {
            window_len: 0,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            SpectrumAnalyzer::new(bad_window),
            Err(ConfigError::ZeroWindow)
        ));
    }

    #[test]
    fn test_zero_input_hits_floor() {
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let silence = vec![0.0; analyzer.window_len()];

        let db = analyzer.estimate_amplitudes(&silence);

        assert_eq!(db.len(), 60);
        for &v in &db {
            assert!(v.is_finite());
            assert!((v - DB_FLOOR).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cosine_peaks_at_matching_bin() {
        // Bin 48 (~840 Hz) is spaced ~50 Hz from its neighbors, wider
        // than the 1024-sample window's resolution, so the peak is
        // cleanly separated.
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let target = analyzer.frequencies()[48];
        let signal = cosine_block(target, 48000.0, 1024);

        let db = analyzer.estimate_amplitudes(&signal);

        let (peak_bin, &peak_db) = db
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 48);
        // Unit cosine projects to amplitude ~1/2: about -6 dB
        assert!((peak_db - (-6.0)).abs() < 0.5);
        assert!(peak_db - db[47] > 10.0);
        assert!(peak_db - db[49] > 10.0);
    }

    #[test]
    fn test_scale_invariance() {
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let signal = cosine_block(440.0, 48000.0, 1024);
        let doubled: Vec<f64> = signal.iter().map(|&s| 2.0 * s).collect();

        let db = analyzer.estimate_amplitudes(&signal);
        let db2 = analyzer.estimate_amplitudes(&doubled);

        // Doubling amplitude quadruples power: +10*log10(4) ~= 6.02 dB
        for (&a, &b) in db.iter().zip(&db2) {
            assert!((b - a - 6.0206).abs() < 1e-6);
        }
    }

    #[test]
    fn test_base_frequency_scenario() {
        // 52.5 Hz cosine into the default 60-bin semitone bank. The
        // lowest bins sit ~3 Hz apart, well inside the ~47 Hz
        // resolution of a 21 ms window, so bins 0 and 1 are nearly
        // indistinguishable; the peak must land in that bottom pair
        // and tower over the rest of the bank.
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let signal = cosine_block(52.5, 48000.0, 1024);

        let db = analyzer.estimate_amplitudes(&signal);

        let (peak_bin, &peak_db) = db
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert!(peak_bin <= 1);
        assert!(peak_db - db[0] < 0.5);
        assert!(db[0] - db[59] > 10.0);
        assert!(db[0] - db[48] > 30.0);
    }
}
