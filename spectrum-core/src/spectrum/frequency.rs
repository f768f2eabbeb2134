//! Musical frequency space construction
//!
//! Target analysis frequencies follow equal-tempered spacing: each bin
//! sits a fixed fraction of an octave above the previous one.

/// Number of equal divisions per octave for bin spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveDivisions {
    /// 12 divisions per octave (semitone spacing)
    Semitone,
    /// 24 divisions per octave (quarter-tone spacing, higher resolution)
    QuarterTone,
}

impl OctaveDivisions {
    /// Divisions per octave as a count
    pub fn per_octave(self) -> u32 {
        match self {
            OctaveDivisions::Semitone => 12,
            OctaveDivisions::QuarterTone => 24,
        }
    }
}

/// Build the ordered set of target analysis frequencies
///
/// # Arguments
/// * `base_frequency` - Frequency of the first bin in Hz (must be > 0,
///   not checked here; `SpectrumAnalyzer::new` validates configuration)
/// * `num_bins` - Number of frequency bins
/// * `divisions` - Octave subdivision for bin spacing
///
/// # Returns
/// Strictly increasing frequencies `f[i] = base * 2^(i/D)` for i in [0, num_bins)
pub fn build_frequency_space(
    base_frequency: f64,
    num_bins: usize,
    divisions: OctaveDivisions,
) -> Vec<f64> {
    debug_assert!(base_frequency > 0.0);

    let d = f64::from(divisions.per_octave());
    (0..num_bins)
        .map(|i| base_frequency * (i as f64 / d).exp2())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let fs = build_frequency_space(52.5, 60, OctaveDivisions::Semitone);

        assert_eq!(fs.len(), 60);
        assert_eq!(fs[0], 52.5);
        assert!((fs[59] - 52.5 * (59.0f64 / 12.0).exp2()).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_increasing() {
        let fs = build_frequency_space(110.0, 48, OctaveDivisions::QuarterTone);

        for pair in fs.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_octave_doubling() {
        let semi = build_frequency_space(440.0, 13, OctaveDivisions::Semitone);
        let quarter = build_frequency_space(440.0, 25, OctaveDivisions::QuarterTone);

        // One octave up doubles the frequency, regardless of subdivision
        assert!((semi[12] - 880.0).abs() < 1e-9);
        assert!((quarter[24] - 880.0).abs() < 1e-9);
    }
}
