//! Head orientation gate.
//!
//! Classifies each frame as acceptable or rejected from three geometric
//! heuristics on a handful of face mesh landmarks:
//!
//! - **Roll**: angle of the line through the outer eye corners.
//! - **Yaw**: ratio of the horizontal nose-to-cheek distances on either side.
//! - **Pitch**: where the nose tip sits between forehead and chin.
//!
//! Any single failure rejects the frame. The gate is stateless; callers decide
//! how to react to a rejection.

use crate::{
    config::PoseGateConfig,
    constants::landmark::{CHIN, FOREHEAD, LEFT_CHEEK, LEFT_EYE_OUTER, NOSE_TIP, RIGHT_CHEEK, RIGHT_EYE_OUTER},
    landmarks::LandmarkFrame,
    Result,
};
use serde::Serialize;

/// Outcome of the pose gate for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseGateResult {
    /// Whether the head orientation is unsuitable for blink detection
    pub rejected: bool,
    /// Eye-line angle in degrees
    pub roll_degrees: f64,
    /// Left nose-cheek distance over right cheek-nose distance
    pub yaw_ratio: f64,
    /// Forehead-to-nose over forehead-to-chin vertical distance
    pub pitch_ratio: f64,
    pub roll_failed: bool,
    pub yaw_failed: bool,
    pub pitch_failed: bool,
}

/// Stateless head pose classifier
#[derive(Debug, Clone, Default)]
pub struct PoseGate {
    config: PoseGateConfig,
}

impl PoseGate {
    #[must_use]
    pub const fn new(config: PoseGateConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PoseGateConfig {
        &self.config
    }

    /// Evaluate the pose of a frame with a detected face
    ///
    /// Must only be called for frames with `presence == true`; absence is a
    /// distinct condition handled by the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingLandmark`] if the frame lacks any of the
    /// landmarks the heuristics need.
    pub fn evaluate(&self, frame: &LandmarkFrame) -> Result<PoseGateResult> {
        let left_eye = frame.landmark(LEFT_EYE_OUTER)?;
        let right_eye = frame.landmark(RIGHT_EYE_OUTER)?;
        let nose = frame.landmark(NOSE_TIP)?;
        let left_cheek = frame.landmark(LEFT_CHEEK)?;
        let right_cheek = frame.landmark(RIGHT_CHEEK)?;
        let forehead = frame.landmark(FOREHEAD)?;
        let chin = frame.landmark(CHIN)?;

        let roll = (right_eye.y - left_eye.y).atan2(right_eye.x - left_eye.x).to_degrees();

        let dist_nose_to_left = (nose.x - left_cheek.x).abs();
        let dist_nose_to_right = (right_cheek.x - nose.x).abs();
        let yaw_ratio = dist_nose_to_left / dist_nose_to_right;

        let pitch_ratio = (nose.y - forehead.y) / (chin.y - forehead.y);

        Ok(self.classify(roll, yaw_ratio, pitch_ratio))
    }

    /// Apply the thresholds to precomputed measurements
    ///
    /// Boundaries are inclusive: a roll of exactly `max_roll_degrees` or a yaw
    /// ratio of exactly `max_yaw_ratio` is accepted. NaN ratios (coincident
    /// landmarks) are rejected.
    #[must_use]
    pub fn classify(&self, roll_degrees: f64, yaw_ratio: f64, pitch_ratio: f64) -> PoseGateResult {
        let cfg = &self.config;

        let roll_failed = roll_degrees.abs() > cfg.max_roll_degrees;
        let yaw_failed =
            yaw_ratio.is_nan() || yaw_ratio > cfg.max_yaw_ratio || yaw_ratio < 1.0 / cfg.max_yaw_ratio;
        let pitch_failed =
            pitch_ratio.is_nan() || pitch_ratio < cfg.min_pitch_ratio || pitch_ratio > cfg.max_pitch_ratio;

        PoseGateResult {
            rejected: roll_failed || yaw_failed || pitch_failed,
            roll_degrees,
            yaw_ratio,
            pitch_ratio,
            roll_failed,
            yaw_failed,
            pitch_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::landmark::MIN_POSE_LANDMARKS,
        landmarks::{Blendshapes, Landmark},
        Error,
    };

    fn frontal_frame() -> LandmarkFrame {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); MIN_POSE_LANDMARKS];
        points[LEFT_EYE_OUTER] = Landmark::new(0.4, 0.4, 0.0);
        points[RIGHT_EYE_OUTER] = Landmark::new(0.6, 0.4, 0.0);
        points[NOSE_TIP] = Landmark::new(0.5, 0.5, 0.0);
        points[LEFT_CHEEK] = Landmark::new(0.35, 0.5, 0.0);
        points[RIGHT_CHEEK] = Landmark::new(0.65, 0.5, 0.0);
        points[FOREHEAD] = Landmark::new(0.5, 0.25, 0.0);
        points[CHIN] = Landmark::new(0.5, 0.75, 0.0);
        LandmarkFrame::new(0.0, points, Blendshapes::new())
    }

    #[test]
    fn test_frontal_face_accepted() {
        let result = PoseGate::default().evaluate(&frontal_frame()).unwrap();
        assert!(!result.rejected);
        assert!(result.roll_degrees.abs() < 1e-9);
        assert!((result.yaw_ratio - 1.0).abs() < 1e-9);
        assert!((result.pitch_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tilted_eyes_reject_on_roll() {
        let mut frame = frontal_frame();
        // 45 degree eye line
        frame.landmarks[RIGHT_EYE_OUTER] = Landmark::new(0.6, 0.6, 0.0);
        frame.landmarks[LEFT_EYE_OUTER] = Landmark::new(0.4, 0.4, 0.0);

        let result = PoseGate::default().evaluate(&frame).unwrap();
        assert!(result.rejected);
        assert!(result.roll_failed);
        assert!(!result.yaw_failed);
        assert!((result.roll_degrees - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_turned_head_rejects_on_yaw() {
        let mut frame = frontal_frame();
        frame.landmarks[NOSE_TIP].x = 0.62; // left distance 0.27, right 0.03

        let result = PoseGate::default().evaluate(&frame).unwrap();
        assert!(result.yaw_failed);
        assert!(result.rejected);
    }

    #[test]
    fn test_nodding_rejects_on_pitch() {
        let mut frame = frontal_frame();
        frame.landmarks[NOSE_TIP].y = 0.7; // ratio 0.9

        let result = PoseGate::default().evaluate(&frame).unwrap();
        assert!(result.pitch_failed);
        assert!(!result.roll_failed);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let gate = PoseGate::default();
        assert!(!gate.classify(30.0, 1.0, 0.5).rejected);
        assert!(!gate.classify(-30.0, 1.0, 0.5).rejected);
        assert!(gate.classify(30.000_001, 1.0, 0.5).rejected);
        assert!(!gate.classify(0.0, 3.0, 0.5).rejected);
        assert!(!gate.classify(0.0, 1.0, 0.25).rejected);
        assert!(!gate.classify(0.0, 1.0, 0.65).rejected);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let gate = PoseGate::default();
        assert!(gate.classify(0.0, f64::NAN, 0.5).rejected);
        assert!(gate.classify(0.0, f64::INFINITY, 0.5).rejected);
        assert!(gate.classify(0.0, 1.0, f64::NAN).rejected);
    }

    #[test]
    fn test_short_landmark_list_is_an_error() {
        let mut frame = frontal_frame();
        frame.landmarks.truncate(300);
        match PoseGate::default().evaluate(&frame) {
            Err(Error::MissingLandmark { index, available }) => {
                assert_eq!(index, RIGHT_CHEEK);
                assert_eq!(available, 300);
            }
            other => panic!("Expected MissingLandmark, got {other:?}"),
        }
    }
}
