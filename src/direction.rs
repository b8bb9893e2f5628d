//! Head direction mapping.
//!
//! The face center is the midpoint of the axis-aligned bounding box of all
//! landmarks. The horizontal target is mirrored (the camera feed is shown as
//! a mirror) and the vertical target is amplified around the neutral midline
//! before being scaled into the consumer's coordinate space. No temporal
//! smoothing is applied.

use crate::{
    config::{DirectionConfig, Projection},
    constants::NEUTRAL_Y,
    landmarks::{Landmark, LandmarkFrame},
};
use log::warn;
use serde::Serialize;

/// Point in normalized `[0, 1]` camera space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// Direction output for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionTarget {
    /// Projected horizontal coordinate (pixels or world units)
    pub target_x: f64,
    /// Projected vertical coordinate (pixels or world units)
    pub target_y: f64,
    /// World Z of the target plane, only for viewport projections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Mirrored and amplified target before projection
    pub target_normalized: NormalizedPoint,
    /// Raw bounding box center of the face
    pub normalized: NormalizedPoint,
}

/// World-space size of the viewport plane at `depth` in front of a
/// perspective camera
#[must_use]
pub fn viewport_size_at_depth(fov_degrees: f64, aspect: f64, depth: f64) -> (f64, f64) {
    let height = 2.0 * depth * (fov_degrees.to_radians() / 2.0).tan();
    (height * aspect, height)
}

/// Bounding box center of a landmark set
///
/// An empty set maps to the image center.
#[must_use]
pub fn face_center(landmarks: &[Landmark]) -> NormalizedPoint {
    if landmarks.is_empty() {
        return NormalizedPoint { x: 0.5, y: 0.5 };
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for point in landmarks {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    NormalizedPoint {
        x: (min_x + max_x) / 2.0,
        y: (min_y + max_y) / 2.0,
    }
}

/// Stateless face-center to target mapper
#[derive(Debug, Clone, Default)]
pub struct DirectionMapper {
    config: DirectionConfig,
}

impl DirectionMapper {
    #[must_use]
    pub fn new(config: DirectionConfig) -> Self {
        if let Projection::Viewport { depth, near, far, .. } = config.projection {
            if depth < near || depth > far {
                warn!("Target plane at depth {} will be clipped by the camera ({}..{})", depth, near, far);
            }
        }
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &DirectionConfig {
        &self.config
    }

    /// Map a frame with a detected face to a direction target
    #[must_use]
    pub fn map(&self, frame: &LandmarkFrame) -> DirectionTarget {
        self.map_center(face_center(&frame.landmarks))
    }

    /// Map a precomputed face center to a direction target
    #[must_use]
    pub fn map_center(&self, center: NormalizedPoint) -> DirectionTarget {
        let target = NormalizedPoint {
            x: 1.0 - center.x,
            y: NEUTRAL_Y + (center.y - NEUTRAL_Y) * self.config.vertical_sensitivity,
        };

        let (target_x, target_y, depth) = match self.config.projection {
            Projection::Canvas { width, height } => (target.x * width, target.y * height, None),
            Projection::Viewport {
                fov_degrees,
                aspect,
                depth,
                ..
            } => {
                let (width, height) = viewport_size_at_depth(fov_degrees, aspect, depth);
                // World Y points up, image Y points down
                ((target.x - 0.5) * width, (0.5 - target.y) * height, Some(-depth))
            }
        };

        DirectionTarget {
            target_x,
            target_y,
            depth,
            target_normalized: target,
            normalized: center,
        }
    }
}
