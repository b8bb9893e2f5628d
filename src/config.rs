//! Configuration management for the face signal pipeline

use crate::{constants::*, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Head pose acceptance thresholds
    pub pose_gate: PoseGateConfig,

    /// Blink detector thresholds
    pub blink: BlinkConfig,

    /// Head direction mapping
    pub direction: DirectionConfig,

    /// Frame routing
    pub coordinator: CoordinatorConfig,

    /// Rendering factors passed through to the drawing layer
    pub overlay: OverlayConfig,
}

/// Pose gate thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseGateConfig {
    /// Maximum absolute eye-line roll in degrees
    pub max_roll_degrees: f64,

    /// Maximum nose-to-cheek distance ratio; the reciprocal is the lower bound
    pub max_yaw_ratio: f64,

    /// Lower bound of the forehead-nose / forehead-chin ratio
    pub min_pitch_ratio: f64,

    /// Upper bound of the forehead-nose / forehead-chin ratio
    pub max_pitch_ratio: f64,
}

/// Blink detector thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Median smoothing window; 0 or 1 uses the raw score
    pub smoothing_frames: usize,

    /// Score above which the eyes are considered closed
    pub threshold_open: f64,

    /// Score below which closed eyes are considered open again
    pub threshold_reopen: f64,

    /// Closures shorter than this are not counted
    pub min_duration_ms: f64,

    /// Minimum time between two counted blinks
    pub debounce_ms: f64,
}

/// Head direction mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionConfig {
    /// Gain applied to the vertical offset from the neutral midline
    pub vertical_sensitivity: f64,

    /// Target coordinate space
    pub projection: Projection,
}

/// Coordinate space the direction target is projected into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// 2D pixel canvas, origin top-left
    Canvas { width: f64, height: f64 },

    /// Plane at `depth` in front of a perspective camera looking down -Z
    Viewport {
        fov_degrees: f64,
        aspect: f64,
        depth: f64,
        #[serde(default = "default_near")]
        near: f64,
        #[serde(default = "default_far")]
        far: f64,
    },
}

const fn default_near() -> f64 {
    DEFAULT_CAMERA_NEAR
}

const fn default_far() -> f64 {
    DEFAULT_CAMERA_FAR
}

/// Frame routing switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Run the blink detector and report lock changes
    pub blink_enabled: bool,

    /// Run the direction mapper
    pub direction_enabled: bool,

    /// Clear blink smoothing history when the pose becomes rejected
    pub reset_blink_on_lock: bool,
}

/// Drawing factors for the excluded rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub vector: VectorStyle,
    pub eyes: EyesStyle,
    pub avatar_gaze_sensitivity: f64,
}

/// Arrow overlay factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStyle {
    /// Below this length a centered dot is drawn instead of an arrow
    pub min_epsilon: f64,
    pub min_head_length: f64,
    pub max_head_length: f64,
    pub head_length_factor: f64,
    pub cone_radius_factor: f64,
    pub line_width: f64,
    pub color: String,
}

/// Cartoon eyes overlay factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyesStyle {
    pub eye_radius_factor: f64,
    pub pupil_radius_factor: f64,
    pub eye_spacing_factor: f64,
}

impl Default for PoseGateConfig {
    fn default() -> Self {
        Self {
            max_roll_degrees: DEFAULT_MAX_ROLL_DEGREES,
            max_yaw_ratio: DEFAULT_MAX_YAW_RATIO,
            min_pitch_ratio: DEFAULT_MIN_PITCH_RATIO,
            max_pitch_ratio: DEFAULT_MAX_PITCH_RATIO,
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            smoothing_frames: DEFAULT_SMOOTHING_FRAMES,
            threshold_open: DEFAULT_THRESHOLD_OPEN,
            threshold_reopen: DEFAULT_THRESHOLD_REOPEN,
            min_duration_ms: DEFAULT_MIN_BLINK_DURATION_MS,
            debounce_ms: DEFAULT_BLINK_DEBOUNCE_MS,
        }
    }
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            vertical_sensitivity: DEFAULT_VERTICAL_SENSITIVITY,
            projection: Projection::default(),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::Canvas {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl Projection {
    /// Perspective viewport with default near/far planes
    #[must_use]
    pub const fn viewport(fov_degrees: f64, aspect: f64, depth: f64) -> Self {
        Self::Viewport {
            fov_degrees,
            aspect,
            depth,
            near: DEFAULT_CAMERA_NEAR,
            far: DEFAULT_CAMERA_FAR,
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            blink_enabled: true,
            direction_enabled: true,
            reset_blink_on_lock: true,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            vector: VectorStyle::default(),
            eyes: EyesStyle::default(),
            avatar_gaze_sensitivity: DEFAULT_AVATAR_GAZE_SENSITIVITY,
        }
    }
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            min_epsilon: DEFAULT_ARROW_MIN_EPSILON,
            min_head_length: DEFAULT_ARROW_MIN_HEAD_LENGTH,
            max_head_length: DEFAULT_ARROW_MAX_HEAD_LENGTH,
            head_length_factor: DEFAULT_ARROW_HEAD_LENGTH_FACTOR,
            cone_radius_factor: DEFAULT_ARROW_CONE_RADIUS_FACTOR,
            line_width: DEFAULT_ARROW_LINE_WIDTH,
            color: DEFAULT_ARROW_COLOR.to_string(),
        }
    }
}

impl Default for EyesStyle {
    fn default() -> Self {
        Self {
            eye_radius_factor: DEFAULT_EYE_RADIUS_FACTOR,
            pupil_radius_factor: DEFAULT_PUPIL_RADIUS_FACTOR,
            eye_spacing_factor: DEFAULT_EYE_SPACING_FACTOR,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pose_gate.validate()?;
        self.blink.validate()?;
        self.direction.validate()?;
        Ok(())
    }
}

impl PoseGateConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_roll_degrees > 0.0 && self.max_roll_degrees <= 180.0) {
            return Err(Error::ConfigError(
                "Max roll must be in (0, 180] degrees".to_string(),
            ));
        }
        if !(self.max_yaw_ratio >= 1.0) {
            return Err(Error::ConfigError("Max yaw ratio must be at least 1.0".to_string()));
        }
        if !(self.min_pitch_ratio <= self.max_pitch_ratio) {
            return Err(Error::ConfigError(
                "Min pitch ratio must not exceed max pitch ratio".to_string(),
            ));
        }
        Ok(())
    }
}

impl BlinkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_frames > MAX_SMOOTHING_FRAMES {
            return Err(Error::ConfigError(format!(
                "Smoothing window must be at most {} frames",
                MAX_SMOOTHING_FRAMES
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold_open) || !(0.0..=1.0).contains(&self.threshold_reopen) {
            return Err(Error::ConfigError(
                "Blink thresholds must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.threshold_reopen >= self.threshold_open {
            return Err(Error::ConfigError(
                "Reopen threshold must be lower than the close threshold".to_string(),
            ));
        }
        if !(self.min_duration_ms >= 0.0) || !(self.debounce_ms >= 0.0) {
            return Err(Error::ConfigError(
                "Blink durations must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl DirectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.vertical_sensitivity.is_finite() {
            return Err(Error::ConfigError("Vertical sensitivity must be finite".to_string()));
        }
        match self.projection {
            Projection::Canvas { width, height } => {
                if !(width > 0.0 && height > 0.0) {
                    return Err(Error::ConfigError(
                        "Canvas size must be greater than 0".to_string(),
                    ));
                }
            }
            Projection::Viewport {
                fov_degrees,
                aspect,
                depth,
                near,
                far,
            } => {
                if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
                    return Err(Error::ConfigError(
                        "Field of view must be in (0, 180) degrees".to_string(),
                    ));
                }
                if !(aspect > 0.0 && depth > 0.0) {
                    return Err(Error::ConfigError(
                        "Viewport aspect and depth must be greater than 0".to_string(),
                    ));
                }
                if !(near > 0.0 && near < far) {
                    return Err(Error::ConfigError(
                        "Camera near plane must be positive and closer than far plane".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face signal pipeline configuration

# Head pose acceptance
pose_gate:
  max_roll_degrees: 30.0
  max_yaw_ratio: 3.0
  min_pitch_ratio: 0.25
  max_pitch_ratio: 0.65

# Blink detection
blink:
  smoothing_frames: 1
  threshold_open: 0.4
  threshold_reopen: 0.2
  min_duration_ms: 100.0
  debounce_ms: 300.0

# Head direction target
direction:
  vertical_sensitivity: 2.5
  projection:
    kind: canvas
    width: 1280.0
    height: 720.0
  # projection:
  #   kind: viewport
  #   fov_degrees: 60.0
  #   aspect: 1.7777
  #   depth: 10.0

# Frame routing
coordinator:
  blink_enabled: true
  direction_enabled: true
  reset_blink_on_lock: true

# Drawing factors for renderers
overlay:
  vector:
    min_epsilon: 20.0
    min_head_length: 30.0
    max_head_length: 60.0
    head_length_factor: 0.3
    cone_radius_factor: 0.5
    line_width: 12.0
    color: "rgba(0, 255, 0, 0.8)"
  eyes:
    eye_radius_factor: 0.1
    pupil_radius_factor: 0.4
    eye_spacing_factor: 1.2
  avatar_gaze_sensitivity: 0.5
"#;
