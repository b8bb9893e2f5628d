//! Drawing geometry for direction renderers.
//!
//! The pipeline never draws. These helpers turn a projected target into the
//! shapes a 2D canvas or a rigged 3D avatar needs, so renderers stay thin.

use crate::{
    config::{EyesStyle, VectorStyle},
    constants::CENTERED_DOT_RADIUS,
};
use serde::Serialize;

/// 2D point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shape of the head direction arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ArrowOverlay {
    /// Target too close to the center to show a direction
    Dot { center: Point2, radius: f64 },
    /// Shaft from the canvas center with a triangular head at the target
    Arrow {
        start: Point2,
        shaft_end: Point2,
        tip: Point2,
        base_left: Point2,
        base_right: Point2,
        angle: f64,
        head_length: f64,
        cone_radius: f64,
        line_width: f64,
    },
}

/// Arrow from the canvas center to `target`
#[must_use]
pub fn vector_arrow(width: f64, height: f64, target: Point2, style: &VectorStyle) -> ArrowOverlay {
    let center = Point2::new(width / 2.0, height / 2.0);
    let vx = target.x - center.x;
    let vy = target.y - center.y;
    let len = vx.hypot(vy);

    if len < style.min_epsilon {
        return ArrowOverlay::Dot {
            center,
            radius: CENTERED_DOT_RADIUS,
        };
    }

    let angle = vy.atan2(vx);
    let (sin, cos) = angle.sin_cos();
    let head_length = style
        .max_head_length
        .min(style.min_head_length.max(len * style.head_length_factor));
    let cone_radius = head_length * style.cone_radius_factor;

    // Base corners sit at (-head, -/+cone) in the arrow's local frame
    let corner = |side: f64| {
        Point2::new(
            target.x - head_length * cos + side * cone_radius * sin,
            target.y - head_length * sin - side * cone_radius * cos,
        )
    };

    ArrowOverlay::Arrow {
        start: center,
        shaft_end: Point2::new(target.x - cos * head_length, target.y - sin * head_length),
        tip: target,
        base_left: corner(1.0),
        base_right: corner(-1.0),
        angle,
        head_length,
        cone_radius,
        line_width: style.line_width,
    }
}

/// A single cartoon eye
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeShape {
    pub center: Point2,
    pub radius: f64,
    pub pupil: Point2,
    pub pupil_radius: f64,
}

/// Pair of eyes whose pupils follow the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyesOverlay {
    pub left: EyeShape,
    pub right: EyeShape,
}

/// Cartoon eyes centered on the canvas, looking toward `target`
///
/// Pupil travel scales with the distance from the center relative to the
/// half-diagonal, capped at the eye rim.
#[must_use]
pub fn eyes(width: f64, height: f64, target: Point2, style: &EyesStyle) -> EyesOverlay {
    let cx = width / 2.0;
    let cy = height / 2.0;

    let radius = width.min(height) * style.eye_radius_factor;
    let pupil_radius = radius * style.pupil_radius_factor;
    let spacing = radius * style.eye_spacing_factor;

    let vx = target.x - cx;
    let vy = target.y - cy;
    let max_len = cx.hypot(cy);
    let reach = if max_len > 0.0 { (vx.hypot(vy) / max_len).min(1.0) } else { 0.0 };
    let pupil_dist = reach * (radius - pupil_radius);
    let (sin, cos) = vy.atan2(vx).sin_cos();
    let (dx, dy) = (cos * pupil_dist, sin * pupil_dist);

    let eye = |x: f64| EyeShape {
        center: Point2::new(x, cy),
        radius,
        pupil: Point2::new(x + dx, cy + dy),
        pupil_radius,
    };

    EyesOverlay {
        left: eye(cx - spacing),
        right: eye(cx + spacing),
    }
}

/// Avatar eye-look blendshape weights
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GazeBlendshapes {
    pub eye_look_up: f64,
    pub eye_look_down: f64,
    pub eye_look_left: f64,
    pub eye_look_right: f64,
}

impl GazeBlendshapes {
    /// Per-eye morph target weights in ARKit naming
    #[must_use]
    pub fn morph_targets(&self) -> [(&'static str, f64); 8] {
        [
            ("eyeLookUpLeft", self.eye_look_up),
            ("eyeLookUpRight", self.eye_look_up),
            ("eyeLookDownLeft", self.eye_look_down),
            ("eyeLookDownRight", self.eye_look_down),
            ("eyeLookOutLeft", self.eye_look_left),
            ("eyeLookInRight", self.eye_look_left),
            ("eyeLookInLeft", self.eye_look_right),
            ("eyeLookOutRight", self.eye_look_right),
        ]
    }
}

/// Blendshape weights that turn an avatar's eyes toward a 3D target
///
/// The avatar sits at the origin, so only the target direction matters.
#[must_use]
pub fn gaze_blendshapes(target: [f64; 3], sensitivity: f64) -> GazeBlendshapes {
    let norm = target.iter().map(|c| c * c).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return GazeBlendshapes::default();
    }
    let x = target[0] / norm;
    let y = target[1] / norm;

    GazeBlendshapes {
        eye_look_up: y.max(0.0) * sensitivity,
        eye_look_down: (-y).max(0.0) * sensitivity,
        eye_look_left: x.max(0.0) * sensitivity,
        eye_look_right: (-x).max(0.0) * sensitivity,
    }
}
