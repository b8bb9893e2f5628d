//! Face signal library for real-time landmark streams.
//!
//! Consumes per-frame output of an external face landmark detector (landmark
//! positions, blendshape scores, a timestamp and a presence flag) and turns it
//! into application-facing signals:
//!
//! 1. A pose gate classifying head orientation as acceptable or rejected
//! 2. Blink start/end events with a running count, using median smoothing,
//!    hysteresis thresholds, a minimum duration and a debounce interval
//! 3. A head direction target projected into a 2D canvas or a 3D viewport
//!
//! Processing is synchronous: each frame is fully handled before the next.
//!
//! # Examples
//!
//! ## Frame Coordinator
//!
//! ```
//! use face_signals::{
//!     config::Config,
//!     coordinator::{FrameCoordinator, Notification},
//!     landmarks::LandmarkFrame,
//! };
//!
//! let mut coordinator = FrameCoordinator::new(&Config::default());
//!
//! for notification in coordinator.process(&LandmarkFrame::absent(0.0)) {
//!     if let Notification::FaceLost { lost } = notification {
//!         println!("Face lost: {lost}");
//!     }
//! }
//! ```
//!
//! ## Blink Detection
//!
//! ```
//! use face_signals::blink_detector::{BlinkDetector, BlinkEvent};
//!
//! let mut detector = BlinkDetector::default();
//!
//! assert_eq!(detector.process_score(0.5, 0.0), Some(BlinkEvent::Start { timestamp_ms: 0.0 }));
//! assert_eq!(
//!     detector.process_score(0.1, 150.0),
//!     Some(BlinkEvent::End { count: 1, duration_ms: 150.0 })
//! );
//! ```
//!
//! ## Direction Mapping
//!
//! ```
//! use face_signals::{
//!     config::{DirectionConfig, Projection},
//!     direction::{DirectionMapper, NormalizedPoint},
//! };
//!
//! let mapper = DirectionMapper::new(DirectionConfig {
//!     vertical_sensitivity: 2.5,
//!     projection: Projection::Canvas { width: 640.0, height: 480.0 },
//! });
//!
//! let target = mapper.map_center(NormalizedPoint { x: 0.5, y: 0.5 });
//! assert_eq!((target.target_x, target.target_y), (320.0, 240.0));
//! ```

/// Detector frame data model
pub mod landmarks;

/// Head orientation gate
pub mod pose_gate;

/// Score smoothing filters
pub mod filters;

/// Blink detection state machine
pub mod blink_detector;

/// Face center to target projection
pub mod direction;

/// Per-frame component sequencing
pub mod coordinator;

/// Drawing geometry for renderers
pub mod overlay;

/// Error types and result handling
pub mod error;

/// Replay application
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
