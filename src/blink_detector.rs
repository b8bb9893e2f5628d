//! Blink detection over the eye blink blendshape scores.
//!
//! The detector averages the left and right blink scores, optionally smooths
//! them with a median window, and runs a two-state hysteresis machine:
//!
//! - `Open -> Closed` when the smoothed score rises above `threshold_open`.
//! - `Closed -> Open` when it falls below `threshold_reopen`.
//!
//! A blink is counted on reopening only if the closure lasted longer than
//! `min_duration_ms` and the previous counted blink is more than
//! `debounce_ms` in the past. Reopenings that fail either check still return
//! the phase to `Open`, silently.

use crate::{
    config::BlinkConfig,
    filters::{create_filter, ScoreFilter},
    landmarks::LandmarkFrame,
};
use log::{debug, trace};
use serde::Serialize;

/// Eye phase tracked by the hysteresis machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkPhase {
    #[default]
    Open,
    Closed,
}

/// Event emitted on a phase transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkEvent {
    /// Eyes closed; not yet counted
    Start {
        timestamp_ms: f64,
    },
    /// Eyes reopened after a closure that passed the duration and debounce checks
    End {
        /// Cumulative blink count including this one
        count: u64,
        /// Time between closing and reopening
        duration_ms: f64,
    },
}

/// Stateful blink detector
pub struct BlinkDetector {
    config: BlinkConfig,
    filter: Box<dyn ScoreFilter>,
    phase: BlinkPhase,
    last_close_ms: f64,
    last_counted_ms: Option<f64>,
    count: u64,
}

impl BlinkDetector {
    /// Create a new blink detector
    ///
    /// # Panics
    ///
    /// Panics if `threshold_reopen` is not strictly below `threshold_open`.
    #[must_use]
    pub fn new(config: BlinkConfig) -> Self {
        assert!(
            config.threshold_reopen < config.threshold_open,
            "Reopen threshold must be lower than the close threshold"
        );
        Self {
            filter: create_filter(config.smoothing_frames),
            config,
            phase: BlinkPhase::Open,
            last_close_ms: 0.0,
            last_counted_ms: None,
            count: 0,
        }
    }

    /// Feed one frame with a detected face
    pub fn process(&mut self, frame: &LandmarkFrame) -> Option<BlinkEvent> {
        self.process_score(frame.blink_score(), frame.timestamp_ms)
    }

    /// Feed one raw blink score
    ///
    /// Returns `None` while the smoothing window is filling.
    pub fn process_score(&mut self, score: f64, timestamp_ms: f64) -> Option<BlinkEvent> {
        let Some(smoothed) = self.filter.apply(score) else {
            trace!("Smoothing window filling ({} samples)", self.filter.len());
            return None;
        };

        match self.phase {
            BlinkPhase::Open if smoothed > self.config.threshold_open => {
                self.phase = BlinkPhase::Closed;
                self.last_close_ms = timestamp_ms;
                debug!("Eyes closed at {:.1} ms (score {:.3})", timestamp_ms, smoothed);
                Some(BlinkEvent::Start { timestamp_ms })
            }
            BlinkPhase::Closed if smoothed < self.config.threshold_reopen => {
                self.phase = BlinkPhase::Open;
                let duration_ms = timestamp_ms - self.last_close_ms;
                let debounced = self
                    .last_counted_ms
                    .map_or(true, |last| timestamp_ms - last > self.config.debounce_ms);

                if duration_ms > self.config.min_duration_ms && debounced {
                    self.count += 1;
                    self.last_counted_ms = Some(timestamp_ms);
                    debug!("Blink #{} counted ({:.1} ms)", self.count, duration_ms);
                    Some(BlinkEvent::End {
                        count: self.count,
                        duration_ms,
                    })
                } else {
                    debug!("Eyes reopened after {:.1} ms, not counted", duration_ms);
                    None
                }
            }
            _ => None,
        }
    }

    /// Clear smoothing history and force the phase to `Open`
    ///
    /// The cumulative count and last counted time are kept.
    pub fn reset(&mut self) {
        if self.phase != BlinkPhase::Open || !self.filter.is_empty() {
            debug!("Blink detector reset");
        }
        self.filter.reset();
        self.phase = BlinkPhase::Open;
    }

    #[must_use]
    pub const fn phase(&self) -> BlinkPhase {
        self.phase
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Number of scores currently held by the smoothing window
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.filter.len()
    }

    #[must_use]
    pub const fn config(&self) -> &BlinkConfig {
        &self.config
    }
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(BlinkConfig::default())
    }
}

impl std::fmt::Debug for BlinkDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlinkDetector")
            .field("phase", &self.phase)
            .field("count", &self.count)
            .field("buffered", &self.filter.len())
            .field("filter", &self.filter.name())
            .finish()
    }
}
