//! Mapping analyzer output onto a display range
//!
//! The engine reports raw decibels; what counts as "full bar" is a
//! display decision. The default [-55, -5] dB window is an empirical
//! range that reads well for line-level music, not a contract.

/// Decibel window rescaled linearly onto [0, 1] bar heights
#[derive(Debug, Clone, Copy)]
pub struct DbRange {
    /// Decibel level mapped to an empty bar
    pub min_db: f64,

    /// Decibel level mapped to a full bar
    pub max_db: f64,
}

impl Default for DbRange {
    fn default() -> Self {
        Self {
            min_db: -55.0,
            max_db: -5.0,
        }
    }
}

impl DbRange {
    /// Map one decibel value to a bar height in [0, 1], clamped
    pub fn normalize(&self, db: f64) -> f64 {
        let height = (db - self.min_db) / (self.max_db - self.min_db);
        height.clamp(0.0, 1.0)
    }

    /// Map a full amplitude vector to bar heights
    pub fn heights_into(&self, decibels: &[f64], heights: &mut [f64]) {
        for (h, &db) in heights.iter_mut().zip(decibels) {
            *h = self.normalize(db);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoints() {
        let range = DbRange::default();

        assert_eq!(range.normalize(-55.0), 0.0);
        assert_eq!(range.normalize(-5.0), 1.0);
        assert!((range.normalize(-30.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_clamps() {
        let range = DbRange::default();

        assert_eq!(range.normalize(-200.0), 0.0);
        assert_eq!(range.normalize(3.0), 1.0);
    }

    #[test]
    fn test_heights_into() {
        let range = DbRange {
            min_db: -10.0,
            max_db: 0.0,
        };
        let db = vec![-10.0, -5.0, 0.0, 10.0];
        let mut heights = vec![0.0; 4];

        range.heights_into(&db, &mut heights);

        assert_eq!(heights, vec![0.0, 0.5, 1.0, 1.0]);
    }
}
