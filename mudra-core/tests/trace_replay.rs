//! Trace capture and replay tests
//!
//! Captures scripted device input to a trace file and replays it as a live
//! source, checking that sessions see the same slices.
//!
//! Run with: `cargo test --test trace_replay`

use mudra_core::{
    Event, Gesture, Input, MatchOutcome, ScriptedSource, SensorSource, SessionConfig,
    TracePlayer, TraceRecorder, Waypoint, match_gesture, record,
};
use std::path::Path;
use tempfile::TempDir;

/// Write every input of `source` to a trace at `path`.
fn capture(mut source: ScriptedSource, path: &Path) -> Vec<Input> {
    let config = SessionConfig::default();
    let mut recorder = TraceRecorder::create(path).unwrap();
    let mut all = Vec::new();
    while source.is_connected() {
        for input in source.poll(config.sampling_period()) {
            recorder.record(&input).unwrap();
            all.push(input);
        }
    }
    recorder.finish().unwrap();
    all
}

#[test]
fn test_trace_preserves_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inputs.trace");
    let script = ScriptedSource::new()
        .event(Event::Begin)
        .waypoints([(3, 9, 9), (7, 9, 9)])
        .event_with(Event::StopRecording, (7, 9, 9));

    let written = capture(script, &path);
    let player = TracePlayer::open(&path).unwrap();
    assert_eq!(player.header().event_count, 2);
    assert_eq!(player.header().sample_count, 3);

    let read: Vec<Input> = player.collect::<mudra_core::Result<_>>().unwrap();
    assert_eq!(read, written);
}

#[test]
fn test_replayed_recording_matches_live() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("therapist.trace");
    let config = SessionConfig::default();
    let script = || {
        ScriptedSource::new()
            .event(Event::Begin)
            .waypoints([(9, 9, 9), (12, 9, 9)])
            .idle(3)
            .waypoints([(15, 9, 9), (15, 13, 9)])
            .event(Event::StopRecording)
            .waypoint((2, 2, 2))
    };

    let live = record(script(), &config);
    capture(script(), &path);
    let replayed = record(TracePlayer::open(&path).unwrap(), &config);

    assert_eq!(replayed, live);
    assert_eq!(replayed.len(), 4);
    assert_eq!(replayed[3], Waypoint::new(15, 13, 9));
}

#[test]
fn test_replayed_patient_completes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("patient.trace");
    let config = SessionConfig::default();
    let g: Gesture = [(5, 5, 5), (10, 5, 5)]
        .into_iter()
        .map(Waypoint::from)
        .collect();

    capture(
        ScriptedSource::new().waypoints([(5, 5, 5), (9, 6, 5)]).idle(2),
        &path,
    );
    let outcome = match_gesture(TracePlayer::open(&path).unwrap(), &g, &config);
    assert_eq!(outcome, MatchOutcome::Completed);
}
