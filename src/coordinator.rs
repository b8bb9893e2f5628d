//! Per-frame sequencing of the pose gate, blink detector and direction mapper.
//!
//! One frame is fully processed before the next is accepted. The coordinator
//! owns every component; their state is only touched through their own
//! `process`/`reset` calls. Results leave as [`Notification`] values, either
//! returned directly or pushed into a [`NotificationSink`].

use crate::{
    blink_detector::{BlinkDetector, BlinkEvent},
    config::{Config, CoordinatorConfig},
    direction::{DirectionMapper, DirectionTarget},
    landmarks::LandmarkFrame,
    pose_gate::PoseGate,
};
use log::{debug, warn};
use serde::Serialize;

/// Application-facing output of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Face presence changed, or is still absent
    FaceLost { lost: bool },
    /// Pose gate verdict changed
    LockChanged { locked: bool },
    /// Eyes closed
    BlinkStart { timestamp_ms: f64 },
    /// Counted blink finished
    BlinkEnd { count: u64, duration_ms: f64 },
    /// Head direction target for this frame
    Direction(DirectionTarget),
}

impl From<BlinkEvent> for Notification {
    fn from(event: BlinkEvent) -> Self {
        match event {
            BlinkEvent::Start { timestamp_ms } => Self::BlinkStart { timestamp_ms },
            BlinkEvent::End { count, duration_ms } => Self::BlinkEnd { count, duration_ms },
        }
    }
}

/// Consumer of pipeline notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Sink that collects notifications in memory
#[derive(Debug, Default)]
pub struct VecSink {
    pub notifications: Vec<Notification>,
}

impl NotificationSink for VecSink {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

impl<F: FnMut(&Notification)> NotificationSink for F {
    fn notify(&mut self, notification: &Notification) {
        self(notification);
    }
}

/// Running frame statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoordinatorStats {
    /// Frames accepted for processing
    pub frames: u64,
    /// Frames without a usable face
    pub face_lost_frames: u64,
    /// Frames rejected by the pose gate
    pub rejected_frames: u64,
    /// Frames dropped for going back in time
    pub out_of_order_frames: u64,
}

/// Frame coordinator
#[derive(Debug)]
pub struct FrameCoordinator {
    config: CoordinatorConfig,
    pose_gate: PoseGate,
    blink_detector: BlinkDetector,
    direction_mapper: DirectionMapper,
    face_lost: Option<bool>,
    locked: bool,
    last_timestamp_ms: Option<f64>,
    stats: CoordinatorStats,
}

impl FrameCoordinator {
    /// Build a coordinator and its components from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            config.coordinator.clone(),
            PoseGate::new(config.pose_gate.clone()),
            BlinkDetector::new(config.blink.clone()),
            DirectionMapper::new(config.direction.clone()),
        )
    }

    /// Build a coordinator from preconfigured components
    #[must_use]
    pub fn from_parts(
        config: CoordinatorConfig,
        pose_gate: PoseGate,
        blink_detector: BlinkDetector,
        direction_mapper: DirectionMapper,
    ) -> Self {
        Self {
            config,
            pose_gate,
            blink_detector,
            direction_mapper,
            face_lost: None,
            locked: false,
            last_timestamp_ms: None,
            stats: CoordinatorStats::default(),
        }
    }

    /// Process one frame and return its notifications in emission order
    pub fn process(&mut self, frame: &LandmarkFrame) -> Vec<Notification> {
        let mut sink = VecSink::default();
        self.dispatch(frame, &mut sink);
        sink.notifications
    }

    /// Process one frame, pushing notifications into `sink`
    pub fn dispatch(&mut self, frame: &LandmarkFrame, sink: &mut dyn NotificationSink) {
        if let Some(last) = self.last_timestamp_ms {
            if frame.timestamp_ms < last {
                warn!(
                    "Dropping frame at {:.1} ms, older than previous frame at {:.1} ms",
                    frame.timestamp_ms, last
                );
                self.stats.out_of_order_frames += 1;
                return;
            }
        }
        self.last_timestamp_ms = Some(frame.timestamp_ms);
        self.stats.frames += 1;

        if !frame.presence {
            self.handle_face_lost(sink);
            return;
        }

        let pose = match self.pose_gate.evaluate(frame) {
            Ok(pose) => pose,
            Err(e) => {
                warn!("Pose gate could not evaluate frame at {:.1} ms: {}", frame.timestamp_ms, e);
                self.handle_face_lost(sink);
                return;
            }
        };

        if self.face_lost != Some(false) {
            if self.face_lost.is_some() {
                debug!("Face found at {:.1} ms", frame.timestamp_ms);
                sink.notify(&Notification::FaceLost { lost: false });
            }
            self.face_lost = Some(false);
        }

        if pose.rejected {
            self.stats.rejected_frames += 1;
        }

        if self.config.blink_enabled && pose.rejected != self.locked {
            self.locked = pose.rejected;
            debug!(
                "Pose {} (roll {:.1}, yaw {:.2}, pitch {:.2})",
                if pose.rejected { "rejected" } else { "accepted" },
                pose.roll_degrees,
                pose.yaw_ratio,
                pose.pitch_ratio
            );
            if pose.rejected && self.config.reset_blink_on_lock {
                self.blink_detector.reset();
            }
            sink.notify(&Notification::LockChanged { locked: pose.rejected });
        }

        if self.config.direction_enabled {
            sink.notify(&Notification::Direction(self.direction_mapper.map(frame)));
        }

        if self.config.blink_enabled && !pose.rejected {
            if let Some(event) = self.blink_detector.process(frame) {
                sink.notify(&event.into());
            }
        }
    }

    fn handle_face_lost(&mut self, sink: &mut dyn NotificationSink) {
        if self.face_lost != Some(true) {
            debug!("Face lost");
        }
        self.face_lost = Some(true);
        self.stats.face_lost_frames += 1;
        self.blink_detector.reset();
        sink.notify(&Notification::FaceLost { lost: true });

        // Close the lock edge so edge-only consumers do not stay locked
        if self.locked {
            self.locked = false;
            sink.notify(&Notification::LockChanged { locked: false });
        }
    }

    /// Whether the last evaluated pose was rejected
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn blink_detector(&self) -> &BlinkDetector {
        &self.blink_detector
    }

    #[must_use]
    pub const fn stats(&self) -> CoordinatorStats {
        self.stats
    }
}
