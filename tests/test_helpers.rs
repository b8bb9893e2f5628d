//! Helper functions and utilities for tests

#![allow(dead_code)]

use face_signals::{
    constants::{
        landmark::{CHIN, FOREHEAD, LEFT_CHEEK, LEFT_EYE_OUTER, NOSE_TIP, RIGHT_CHEEK, RIGHT_EYE_OUTER},
        EYE_BLINK_LEFT, EYE_BLINK_RIGHT,
    },
    landmarks::{Blendshapes, Landmark, LandmarkFrame},
};

/// Point count of the upstream face mesh with irises
pub const FACE_MESH_POINTS: usize = 478;

/// Face mesh of a frontal, upright face centered at `(cx, cy)`
///
/// The bounding box spans `cx ± 0.15`, `cy ± 0.25`; the pose ratios are
/// roll 0°, yaw 1.0, pitch 0.5.
pub fn frontal_landmarks(cx: f64, cy: f64) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(cx, cy, 0.0); FACE_MESH_POINTS];
    points[LEFT_EYE_OUTER] = Landmark::new(cx - 0.1, cy - 0.1, 0.0);
    points[RIGHT_EYE_OUTER] = Landmark::new(cx + 0.1, cy - 0.1, 0.0);
    points[NOSE_TIP] = Landmark::new(cx, cy, -0.05);
    points[LEFT_CHEEK] = Landmark::new(cx - 0.15, cy, 0.0);
    points[RIGHT_CHEEK] = Landmark::new(cx + 0.15, cy, 0.0);
    points[FOREHEAD] = Landmark::new(cx, cy - 0.25, 0.0);
    points[CHIN] = Landmark::new(cx, cy + 0.25, 0.0);
    points
}

/// Blendshapes with both eyes at the same blink score
pub fn blink_shapes(score: f64) -> Blendshapes {
    Blendshapes::new().with(EYE_BLINK_LEFT, score).with(EYE_BLINK_RIGHT, score)
}

/// Frontal face frame at the image center with a blink score
pub fn face_frame(timestamp_ms: f64, score: f64) -> LandmarkFrame {
    LandmarkFrame::new(timestamp_ms, frontal_landmarks(0.5, 0.5), blink_shapes(score))
}

/// Face frame whose eye line is rolled by `degrees`
pub fn rolled_frame(timestamp_ms: f64, score: f64, degrees: f64) -> LandmarkFrame {
    let mut frame = face_frame(timestamp_ms, score);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let left = frame.landmarks[LEFT_EYE_OUTER];
    frame.landmarks[RIGHT_EYE_OUTER] = Landmark::new(left.x + 0.2 * cos, left.y + 0.2 * sin, 0.0);
    frame
}
