//! Smoothing filters for the blink score signal.
//!
//! A filter may withhold output while it is still accumulating history;
//! callers treat `None` as "no decision this frame", not as an error.

/// Median filter for spike rejection
pub mod median;

/// Trait for all score filters
pub trait ScoreFilter: Send + Sync {
    /// Push a raw score and return the smoothed value, if one is available
    fn apply(&mut self, score: f64) -> Option<f64>;

    /// Discard buffered history
    fn reset(&mut self);

    /// Number of buffered samples
    fn len(&self) -> usize;

    /// Whether the filter holds no history
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes scores through unchanged
pub struct NoFilter;

impl ScoreFilter for NoFilter {
    fn apply(&mut self, score: f64) -> Option<f64> {
        Some(score)
    }

    fn reset(&mut self) {}

    fn len(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create the score filter for a smoothing window
///
/// Windows of 0 or 1 frame use the raw score.
pub fn create_filter(smoothing_frames: usize) -> Box<dyn ScoreFilter> {
    if smoothing_frames > 1 {
        Box::new(median::MedianFilter::new(smoothing_frames))
    } else {
        Box::new(NoFilter)
    }
}
