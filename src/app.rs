//! Replay application: drives the pipeline from recorded detector output.
//!
//! Input is JSON lines, one [`LandmarkFrame`] per line (blank lines and lines
//! starting with `#` are ignored). Output is JSON lines, one
//! [`Notification`] per line, optionally followed by overlay geometry for the
//! frame's direction target.

use crate::{
    config::{Config, Projection},
    coordinator::{FrameCoordinator, Notification},
    direction::DirectionTarget,
    error::{Error, Result},
    landmarks::LandmarkFrame,
    overlay::{eyes, gaze_blendshapes, vector_arrow, ArrowOverlay, EyesOverlay, GazeBlendshapes, Point2},
};
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

/// Where recorded frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    /// Standard input
    Stdin,
    /// JSON lines file
    File(PathBuf),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Frame input
    pub source: FrameSource,
    /// Pipeline configuration
    pub pipeline: Config,
    /// Emit overlay geometry after each direction notification
    pub emit_overlay: bool,
}

/// Totals for a finished replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub frames: u64,
    pub blinks: u64,
    pub face_lost_frames: u64,
    pub rejected_frames: u64,
    pub out_of_order_frames: u64,
    pub skipped_lines: u64,
}

/// Overlay geometry record written next to a direction notification
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "overlay")]
pub struct OverlayRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow: Option<ArrowOverlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<EyesOverlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<GazeBlendshapes>,
}

/// Replay application
pub struct ReplayApp {
    config: AppConfig,
    coordinator: FrameCoordinator,
}

impl ReplayApp {
    /// Create a new replay application
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing face signal replay");
        config.pipeline.validate()?;
        let coordinator = FrameCoordinator::new(&config.pipeline);
        Ok(Self { config, coordinator })
    }

    /// Replay the configured source, writing notifications to `out`
    pub fn run<W: Write>(&mut self, out: W) -> Result<ReplaySummary> {
        match self.config.source.clone() {
            FrameSource::Stdin => {
                info!("Reading frames from stdin");
                self.run_reader(io::stdin().lock(), out)
            }
            FrameSource::File(path) => {
                info!("Reading frames from {}", path.display());
                let file = File::open(&path)?;
                self.run_reader(BufReader::new(file), out)
            }
        }
    }

    /// Replay frames from any buffered reader
    pub fn run_reader<R: BufRead, W: Write>(&mut self, reader: R, mut out: W) -> Result<ReplaySummary> {
        let mut skipped_lines = 0;
        let mut blinks = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let frame: LandmarkFrame = match serde_json::from_str(trimmed) {
                Ok(frame) => frame,
                Err(e) => {
                    let err = Error::InvalidFrame {
                        line: idx + 1,
                        message: e.to_string(),
                    };
                    warn!("Skipping record: {}", err);
                    skipped_lines += 1;
                    continue;
                }
            };

            for notification in self.coordinator.process(&frame) {
                serde_json::to_writer(&mut out, &notification)?;
                writeln!(out)?;

                match &notification {
                    Notification::BlinkEnd { count, .. } => {
                        blinks += 1;
                        info!("Blink count: {}", count);
                    }
                    Notification::Direction(target) if self.config.emit_overlay => {
                        serde_json::to_writer(&mut out, &self.overlay_for(target))?;
                        writeln!(out)?;
                    }
                    _ => {}
                }
            }
        }
        out.flush()?;

        let stats = self.coordinator.stats();
        let summary = ReplaySummary {
            frames: stats.frames,
            blinks,
            face_lost_frames: stats.face_lost_frames,
            rejected_frames: stats.rejected_frames,
            out_of_order_frames: stats.out_of_order_frames,
            skipped_lines,
        };
        debug!("Replay summary: {:?}", summary);
        Ok(summary)
    }

    fn overlay_for(&self, target: &DirectionTarget) -> OverlayRecord {
        let overlay = &self.config.pipeline.overlay;
        match self.config.pipeline.direction.projection {
            Projection::Canvas { width, height } => {
                let point = Point2::new(target.target_x, target.target_y);
                OverlayRecord {
                    arrow: Some(vector_arrow(width, height, point, &overlay.vector)),
                    eyes: Some(eyes(width, height, point, &overlay.eyes)),
                    gaze: None,
                }
            }
            Projection::Viewport { .. } => OverlayRecord {
                arrow: None,
                eyes: None,
                gaze: Some(gaze_blendshapes(
                    [target.target_x, target.target_y, target.depth.unwrap_or(0.0)],
                    overlay.avatar_gaze_sensitivity,
                )),
            },
        }
    }

    /// Access the pipeline coordinator
    #[must_use]
    pub const fn coordinator(&self) -> &FrameCoordinator {
        &self.coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(emit_overlay: bool) -> ReplayApp {
        ReplayApp::new(AppConfig {
            source: FrameSource::Stdin,
            pipeline: Config::default(),
            emit_overlay,
        })
        .unwrap()
    }

    #[test]
    fn test_skips_comments_and_bad_lines() {
        let input = "# recorded session\n\n{\"timestamp_ms\": 0, \"presence\": false}\nnot json\n";
        let mut out = Vec::new();
        let summary = app(false).run_reader(input.as_bytes(), &mut out).unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.face_lost_frames, 1);
        assert_eq!(summary.skipped_lines, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "{\"type\":\"face_lost\",\"lost\":true}\n");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut pipeline = Config::default();
        pipeline.blink.threshold_open = 0.1;
        let result = ReplayApp::new(AppConfig {
            source: FrameSource::Stdin,
            pipeline,
            emit_overlay: false,
        });
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
