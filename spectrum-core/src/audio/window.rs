//! Trailing analysis window over the capture stream
//!
//! Keeps the most recent `window_len` samples. Capture chunks are
//! typically much shorter than the analysis window, so consecutive
//! windows overlap: the display refreshes once per chunk while
//! frequency resolution stays fixed by the window length.

/// Fixed-length sliding sample window, zero-filled at start
pub struct SlidingWindow {
    samples: Vec<f64>,
}

impl SlidingWindow {
    /// Create new window of `window_len` samples, initially silent
    pub fn new(window_len: usize) -> Self {
        Self {
            samples: vec![0.0; window_len],
        }
    }

    /// Shift in a new capture chunk, discarding the oldest samples
    ///
    /// A chunk at least as long as the window replaces the whole
    /// window with the chunk's most recent samples.
    pub fn push(&mut self, chunk: &[f64]) {
        let len = self.samples.len();
        if chunk.len() >= len {
            self.samples.copy_from_slice(&chunk[chunk.len() - len..]);
        } else {
            self.samples.copy_within(chunk.len().., 0);
            self.samples[len - chunk.len()..].copy_from_slice(chunk);
        }
    }

    /// Current window contents, oldest sample first
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Window length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True only for a degenerate zero-length window
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
