//! JSON lines replay through the full pipeline

mod test_helpers;

use face_signals::{
    app::{AppConfig, FrameSource, ReplayApp},
    config::{Config, Projection},
    landmarks::LandmarkFrame,
};
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{face_frame, rolled_frame};

fn session() -> String {
    let frames = [
        face_frame(0.0, 0.0),
        face_frame(33.0, 0.9),
        face_frame(200.0, 0.0),
        rolled_frame(233.0, 0.0, 45.0),
        LandmarkFrame::absent(266.0),
        face_frame(300.0, 0.0),
    ];
    frames
        .iter()
        .map(|f| serde_json::to_string(f).unwrap() + "\n")
        .collect()
}

fn replay(pipeline: Config, emit_overlay: bool, input: &str) -> (Vec<Value>, face_signals::app::ReplaySummary) {
    let mut app = ReplayApp::new(AppConfig {
        source: FrameSource::Stdin,
        pipeline,
        emit_overlay,
    })
    .unwrap();
    let mut out = Vec::new();
    let summary = app.run_reader(input.as_bytes(), &mut out).unwrap();
    let records = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (records, summary)
}

fn types(records: &[Value]) -> Vec<&str> {
    records.iter().map(|r| r["type"].as_str().unwrap()).collect()
}

#[test]
fn test_session_notifications() {
    let (records, summary) = replay(Config::default(), false, &session());

    assert_eq!(
        types(&records),
        [
            "direction",
            "direction",
            "blink_start",
            "direction",
            "blink_end",
            "lock_changed",
            "direction",
            "face_lost",
            "lock_changed",
            "face_lost",
            "direction",
        ]
    );
    assert_eq!(records[4]["count"], 1);
    assert_eq!(records[4]["duration_ms"], 167.0);
    assert_eq!(records[5]["locked"], true);
    assert_eq!(records[7]["lost"], true);
    assert_eq!(records[8]["locked"], false);
    assert_eq!(records[9]["lost"], false);

    assert_eq!(summary.frames, 6);
    assert_eq!(summary.blinks, 1);
    assert_eq!(summary.rejected_frames, 1);
    assert_eq!(summary.face_lost_frames, 1);
    assert_eq!(summary.skipped_lines, 0);
}

#[test]
fn test_canvas_overlay_records() {
    let (records, _) = replay(Config::default(), true, &session());
    let overlay = &records[1];

    assert_eq!(overlay["type"], "overlay");
    // Centered face: target sits on the canvas center
    assert_eq!(overlay["arrow"]["shape"], "dot");
    assert!(overlay["eyes"].is_object());
    assert!(overlay.get("gaze").is_none());
}

#[test]
fn test_viewport_overlay_records() {
    let mut pipeline = Config::default();
    pipeline.direction.projection = Projection::viewport(60.0, 16.0 / 9.0, 10.0);

    let (records, _) = replay(pipeline, true, &session());
    let direction = &records[0];
    assert_eq!(direction["depth"], -10.0);

    let overlay = &records[1];
    assert!(overlay["gaze"].is_object());
    assert!(overlay.get("arrow").is_none());
}

#[test]
fn test_replay_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", session()).unwrap();

    let mut app = ReplayApp::new(AppConfig {
        source: FrameSource::File(file.path().to_path_buf()),
        pipeline: Config::default(),
        emit_overlay: false,
    })
    .unwrap();
    let mut out = Vec::new();
    let summary = app.run(&mut out).unwrap();

    assert_eq!(summary.frames, 6);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 11);
}

#[test]
fn test_missing_input_file() {
    let mut app = ReplayApp::new(AppConfig {
        source: FrameSource::File("/nonexistent/session.jsonl".into()),
        pipeline: Config::default(),
        emit_overlay: false,
    })
    .unwrap();
    assert!(app.run(Vec::new()).is_err());
}
