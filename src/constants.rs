//! Constants used throughout the pipeline

/// Landmark indices of the upstream 478-point face mesh model
pub mod landmark {
    /// Nose tip
    pub const NOSE_TIP: usize = 1;
    /// Top of the forehead
    pub const FOREHEAD: usize = 10;
    /// Outer corner of the left eye (image left)
    pub const LEFT_EYE_OUTER: usize = 33;
    /// Bottom of the chin
    pub const CHIN: usize = 152;
    /// Left cheek extreme (image left)
    pub const LEFT_CHEEK: usize = 234;
    /// Outer corner of the right eye (image right)
    pub const RIGHT_EYE_OUTER: usize = 263;
    /// Right cheek extreme (image right)
    pub const RIGHT_CHEEK: usize = 454;

    /// Smallest landmark count that contains every index used by the pose gate
    pub const MIN_POSE_LANDMARKS: usize = RIGHT_CHEEK + 1;
}

/// Blendshape category names read by the blink detector
pub const EYE_BLINK_LEFT: &str = "eyeBlinkLeft";
pub const EYE_BLINK_RIGHT: &str = "eyeBlinkRight";

/// Default pose gate thresholds
pub const DEFAULT_MAX_ROLL_DEGREES: f64 = 30.0;
pub const DEFAULT_MAX_YAW_RATIO: f64 = 3.0;
pub const DEFAULT_MIN_PITCH_RATIO: f64 = 0.25;
pub const DEFAULT_MAX_PITCH_RATIO: f64 = 0.65;

/// Default blink detector parameters
pub const DEFAULT_SMOOTHING_FRAMES: usize = 1;
/// Largest accepted median window (10 s at 30 fps)
pub const MAX_SMOOTHING_FRAMES: usize = 300;
pub const DEFAULT_THRESHOLD_OPEN: f64 = 0.4;
pub const DEFAULT_THRESHOLD_REOPEN: f64 = 0.2;
pub const DEFAULT_MIN_BLINK_DURATION_MS: f64 = 100.0;
pub const DEFAULT_BLINK_DEBOUNCE_MS: f64 = 300.0;

/// Default direction mapping parameters
pub const DEFAULT_VERTICAL_SENSITIVITY: f64 = 2.5;
pub const NEUTRAL_Y: f64 = 0.5;
pub const DEFAULT_CANVAS_WIDTH: f64 = 1280.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 720.0;
pub const DEFAULT_FOV_DEGREES: f64 = 60.0;
pub const DEFAULT_VIEWPORT_DEPTH: f64 = 10.0;
pub const DEFAULT_CAMERA_NEAR: f64 = 0.1;
pub const DEFAULT_CAMERA_FAR: f64 = 5000.0;

/// Vector arrow overlay defaults
pub const DEFAULT_ARROW_MIN_EPSILON: f64 = 20.0;
pub const DEFAULT_ARROW_MIN_HEAD_LENGTH: f64 = 30.0;
pub const DEFAULT_ARROW_MAX_HEAD_LENGTH: f64 = 60.0;
pub const DEFAULT_ARROW_HEAD_LENGTH_FACTOR: f64 = 0.3;
pub const DEFAULT_ARROW_CONE_RADIUS_FACTOR: f64 = 0.5;
pub const DEFAULT_ARROW_LINE_WIDTH: f64 = 12.0;
pub const DEFAULT_ARROW_COLOR: &str = "rgba(0, 255, 0, 0.8)";
pub const CENTERED_DOT_RADIUS: f64 = 12.0;

/// Cartoon eyes overlay defaults
pub const DEFAULT_EYE_RADIUS_FACTOR: f64 = 0.1;
pub const DEFAULT_PUPIL_RADIUS_FACTOR: f64 = 0.4;
pub const DEFAULT_EYE_SPACING_FACTOR: f64 = 1.2;

/// Avatar gaze blendshape gain
pub const DEFAULT_AVATAR_GAZE_SENSITIVITY: f64 = 0.5;

