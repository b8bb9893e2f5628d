//! Per-frame detector output consumed by the pipeline.
//!
//! A [`LandmarkFrame`] is produced once per camera sample by the external
//! face landmark detector. Coordinates are normalized camera space in
//! `[0, 1]`, indexed positionally; see [`crate::constants::landmark`] for the
//! indices the pipeline relies on.

use crate::{
    constants::{EYE_BLINK_LEFT, EYE_BLINK_RIGHT},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single facial keypoint in normalized camera space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Blendshape scores keyed by category name
///
/// Lookups of categories the detector did not report return `0.0`, so a
/// momentary detector glitch reads as "eyes open" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blendshapes(HashMap<String, f64>);

impl Blendshapes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of a category, `0.0` when absent
    #[must_use]
    pub fn score(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Insert or replace a category score
    pub fn set(&mut self, name: impl Into<String>, score: f64) {
        self.0.insert(name.into(), score);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, score: f64) -> Self {
        self.set(name, score);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Blendshapes {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One detector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Monotonically increasing capture time in milliseconds
    pub timestamp_ms: f64,

    /// Whether the detector found a face in this sample
    pub presence: bool,

    /// Face mesh points, indexed positionally
    #[serde(default)]
    pub landmarks: Vec<Landmark>,

    /// Blendshape scores for the detected face
    #[serde(default)]
    pub blendshapes: Blendshapes,
}

impl LandmarkFrame {
    /// Create a frame with a detected face
    #[must_use]
    pub fn new(timestamp_ms: f64, landmarks: Vec<Landmark>, blendshapes: Blendshapes) -> Self {
        Self {
            timestamp_ms,
            presence: true,
            landmarks,
            blendshapes,
        }
    }

    /// Create a frame in which no face was detected
    #[must_use]
    pub fn absent(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            presence: false,
            landmarks: Vec::new(),
            blendshapes: Blendshapes::new(),
        }
    }

    /// Checked landmark access
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLandmark`] if the frame has fewer than
    /// `index + 1` points.
    pub fn landmark(&self, index: usize) -> Result<&Landmark> {
        self.landmarks.get(index).ok_or(Error::MissingLandmark {
            index,
            available: self.landmarks.len(),
        })
    }

    /// Mean of the left and right eye blink scores
    #[must_use]
    pub fn blink_score(&self) -> f64 {
        (self.blendshapes.score(EYE_BLINK_LEFT) + self.blendshapes.score(EYE_BLINK_RIGHT)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_blendshape_defaults_to_zero() {
        let shapes = Blendshapes::new().with(EYE_BLINK_LEFT, 0.8);
        assert_eq!(shapes.score(EYE_BLINK_RIGHT), 0.0);

        let frame = LandmarkFrame::new(0.0, Vec::new(), shapes);
        assert!((frame.blink_score() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_landmark_access() {
        let frame = LandmarkFrame::new(0.0, vec![Landmark::new(0.1, 0.2, 0.0); 3], Blendshapes::new());
        assert_eq!(frame.landmark(2).unwrap().x, 0.1);
        match frame.landmark(3) {
            Err(Error::MissingLandmark { index, available }) => {
                assert_eq!(index, 3);
                assert_eq!(available, 3);
            }
            other => panic!("Expected MissingLandmark, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_detector_record() {
        let json = r#"{
            "timestamp_ms": 16.5,
            "presence": true,
            "landmarks": [{"x": 0.5, "y": 0.4, "z": -0.02}, {"x": 0.6, "y": 0.45}],
            "blendshapes": {"eyeBlinkLeft": 0.9, "eyeBlinkRight": 0.7}
        }"#;
        let frame: LandmarkFrame = serde_json::from_str(json).unwrap();
        assert!(frame.presence);
        assert_eq!(frame.landmarks.len(), 2);
        assert_eq!(frame.landmarks[1].z, 0.0);
        assert!((frame.blink_score() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_absent_record() {
        let frame: LandmarkFrame = serde_json::from_str(r#"{"timestamp_ms": 3.0, "presence": false}"#).unwrap();
        assert_eq!(frame, LandmarkFrame::absent(3.0));
    }
}
