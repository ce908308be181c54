#![forbid(unsafe_code)]

//! Replays of the checked-in scripts, through the library and the binary.
//!
//! Run:
//!   cargo test -p pagestack-harness --test replay

use std::path::{Path, PathBuf};
use std::process::Command;

use pagestack::{Orientation, StackController, StackState};
use pagestack_harness::cli::{StackArgs, build_controller};
use pagestack_harness::determinism::frame_hash;
use pagestack_harness::replay::replay;
use pagestack_harness::script::load_script;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn stack(width: f64, height: f64) -> StackController {
    build_controller(&StackArgs {
        width,
        height,
        cards: 3,
        policy: None,
    })
    .unwrap()
}

fn kinds(records: &[pagestack_harness::replay::ReplayRecord]) -> Vec<&'static str> {
    records.iter().map(|r| r.transition.kind()).collect()
}

#[test]
fn mobile_gesture_script() {
    let steps = load_script(&fixture("mobile_gestures.jsonl")).unwrap();
    let mut stack = stack(390.0, 844.0);
    let records = replay(&steps, &mut stack);

    assert_eq!(
        kinds(&records),
        vec!["changed", "changed", "bounce", "changed", "ignored", "changed", "changed"]
    );
    let states: Vec<i32> = records.iter().map(|r| r.frame.active_index()).collect();
    assert_eq!(states, vec![0, 1, 1, 0, 0, 2, -1]);
    assert_eq!(records[2].detail().as_deref(), Some("card 1 back to 0"));
    assert_eq!(records[4].detail().as_deref(), Some("card 2 is not draggable"));
    assert_eq!(stack.positions(), vec![764.0, 944.0, 944.0]);
}

#[test]
fn desktop_session_script() {
    let steps = load_script(&fixture("desktop_session.jsonl")).unwrap();
    let mut stack = stack(1280.0, 800.0);
    let records = replay(&steps, &mut stack);

    assert_eq!(
        kinds(&records),
        vec![
            "changed",
            "peek_changed",
            "peek_changed",
            "restacked",
            "restacked",
            "ignored",
            "restacked",
            "ignored",
            "changed",
            "resized",
            "ignored",
        ]
    );
    assert_eq!(records[4].frame.len(), 5);
    assert_eq!(records[6].frame.state, StackState::Open(3));
    assert_eq!(stack.orientation(), Orientation::Vertical);
    assert_eq!(stack.state(), StackState::Idle);
    assert_eq!(stack.positions(), vec![764.0, 944.0, 944.0, 944.0]);
}

#[test]
fn replay_is_deterministic() {
    let steps = load_script(&fixture("desktop_session.jsonl")).unwrap();
    let a: Vec<String> = replay(&steps, &mut stack(1280.0, 800.0))
        .into_iter()
        .map(|r| r.hash)
        .collect();
    let b: Vec<String> = replay(&steps, &mut stack(1280.0, 800.0))
        .into_iter()
        .map(|r| r.hash)
        .collect();
    assert_eq!(a, b);
    assert_eq!(a.last(), Some(&frame_hash(&{
        let mut s = stack(1280.0, 800.0);
        for step in &steps {
            s.handle(step.input);
        }
        s.frame()
    })));
}

#[test]
fn binary_prints_fixtures() {
    let output = Command::new(env!("CARGO_BIN_EXE_pagestack-harness"))
        .arg("fixture")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[700, 820, 910]"), "{stdout}");
    assert!(stdout.contains("[200, 200, 200, 200, 240, 280, 330, 400]"), "{stdout}");
}

#[test]
fn binary_replays_as_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_pagestack-harness"))
        .arg("replay")
        .arg(fixture("mobile_gestures.jsonl"))
        .args(["--width", "390", "--height", "844", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0]["frame"]["orientation"], "vertical");
    assert_eq!(lines[6]["frame"]["state"]["kind"], "idle");
}

#[test]
fn binary_exit_code_for_bad_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    std::fs::write(&path, "{\"kind\":\"click\",\"index\":0}\nnot json\n").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_pagestack-harness"))
        .arg("replay")
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 2"), "{stderr}");
}
