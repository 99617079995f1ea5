//! End-to-end menu flows against a scripted armband.

use mudra::Console;
use mudra_core::{Event, ScriptedSource, SessionConfig};
use std::io::Cursor;

const CURL: [(u8, u8, u8); 3] = [(9, 9, 9), (14, 8, 10), (16, 11, 9)];

fn run_console(input: &str, source: ScriptedSource) -> (String, ScriptedSource) {
    let mut console = Console::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        source,
        SessionConfig::default(),
    );
    console.run().unwrap();
    let (output, source) = console.into_parts();
    (String::from_utf8(output).unwrap(), source)
}

#[test]
fn test_record_then_reps() {
    let source = ScriptedSource::new()
        // therapist
        .waypoints(CURL)
        .event(Event::StopRecording)
        // two clean reps
        .waypoints(CURL)
        .waypoints(CURL);
    let (out, source) = run_console("1\ny\ncurl\n2\n1\n2\nq\n", source);

    assert!(out.contains("R: 14 P: 8 Y: 10"));
    assert!(out.contains("Gesture curl saved!"));
    assert!(out.contains("1. curl"));
    assert!(out.contains("Reps: 0 / 2"));
    assert!(out.contains("Reps: 1 / 2"));
    assert!(out.contains("Reps: 2 / 2"));
    assert_eq!(out.matches("Gesture completed!").count(), 2);
    assert!(out.contains("Step 2 / 3"));
    assert!(!out.contains("strike"));

    assert_eq!(source.sessions_begun(), 3);
    assert!(!source.in_session());
}

#[test]
fn test_reps_report_strikes() {
    let source = ScriptedSource::new()
        .waypoints(CURL)
        .event(Event::StopRecording)
        .waypoints([(9, 9, 9), (3, 3, 3), (14, 8, 10), (16, 11, 9)]);
    let (out, _) = run_console("1\ny\ncurl\n2\n1\n1\nq\n", source);

    assert_eq!(out.matches("strike").count(), 1);
    assert!(!out.contains("RESET"));
    assert!(out.contains("Reps: 1 / 1"));
}

#[test]
fn test_reps_stop_on_abort() {
    let source = ScriptedSource::new()
        .waypoints(CURL)
        .event(Event::StopRecording)
        .waypoints(CURL)
        .waypoint((9, 9, 9))
        .event(Event::AbortMatching);
    let (out, source) = run_console("1\ny\ncurl\n2\n1\nabc\n0\n3\nq\n", source);

    assert_eq!(out.matches("Incorrect input!").count(), 2);
    assert!(out.contains("Reps: 1 / 3"));
    assert!(out.contains("Reps stopped at 1 / 3 (aborted)."));
    assert!(!out.contains("Reps: 3 / 3"));
    // back at the menu after the abort
    assert!(out.ends_with("q. Quit\n"));
    assert!(!source.in_session());
}

#[test]
fn test_reps_stop_when_source_closes() {
    let source = ScriptedSource::new()
        .waypoints(CURL)
        .event(Event::StopRecording)
        .waypoint((9, 9, 9));
    let (out, _) = run_console("1\ny\ncurl\n2\n1\n5\n", source);

    assert!(out.contains("Reps stopped at 0 / 5 (source closed)."));
}

#[test]
fn test_end_of_input_mid_prompt() {
    let source = ScriptedSource::new()
        .waypoints(CURL)
        .event(Event::StopRecording);
    let (out, _) = run_console("1\n", source);

    assert!(out.contains("Do you want to save (Y/N)? "));
    assert!(!out.contains("saved!"));
}
