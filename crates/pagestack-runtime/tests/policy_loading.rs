#![forbid(unsafe_code)]

//! Loading `StackPolicy` from TOML and JSON.
//!
//! Run:
//!   cargo test -p pagestack-runtime --features policy-config --test policy_loading

use std::io::Write;

use pagestack_runtime::{PolicyConfigError, StackController, StackPolicy, StackState};

#[test]
fn empty_toml_yields_defaults() {
    let policy = StackPolicy::from_toml_str("").unwrap();
    assert_eq!(policy, StackPolicy::default());
}

#[test]
fn partial_toml_override_preserves_defaults() {
    let policy = StackPolicy::from_toml_str(
        r#"
breakpoint_px = 900

[layout]
max_open_visible = 3

[gesture]
close_px = 96
"#,
    )
    .unwrap();
    assert_eq!(policy.breakpoint_px, 900.0);
    assert_eq!(policy.layout.max_open_visible, 3);
    assert_eq!(policy.layout.max_closed_visible, 2);
    assert_eq!(policy.layout.stack_increment, 30.0);
    assert_eq!(policy.gesture.close_px, 96.0);
    assert_eq!(policy.gesture.open_px, 120.0);
    assert_eq!(policy.motion.duration_ms, 1000);
}

#[test]
fn json_round_trip() {
    let mut policy = StackPolicy::default();
    policy.mobile.peek_height = 64.0;
    policy.motion.mobile_follow_delay_ms = 150;
    let json = serde_json::to_string(&policy).unwrap();
    let back = StackPolicy::from_json_str(&json).unwrap();
    assert_eq!(back, policy);
}

#[test]
fn toml_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_card_width = 420\n[mobile]\npeek_height = 72").unwrap();
    let policy = StackPolicy::from_toml_file(file.path()).unwrap();
    assert_eq!(policy.default_card_width, 420.0);
    assert_eq!(policy.mobile.peek_height, 72.0);
}

#[test]
fn json_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"gesture":{{"close_px":50,"open_px":70}}}}"#).unwrap();
    let policy = StackPolicy::from_json_file(file.path()).unwrap();
    assert_eq!(policy.gesture.close_px, 50.0);
    assert_eq!(policy.gesture.open_px, 70.0);
}

#[test]
fn missing_file_is_io_error() {
    let err = StackPolicy::from_toml_file("/nonexistent/pagestack-policy.toml").unwrap_err();
    assert!(matches!(err, PolicyConfigError::Io(_)));
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = StackPolicy::from_toml_str("breakpoint_px = [").unwrap_err();
    assert!(matches!(err, PolicyConfigError::Toml(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn malformed_json_is_parse_error() {
    let err = StackPolicy::from_json_str("{").unwrap_err();
    assert!(matches!(err, PolicyConfigError::Json(_)));
}

#[test]
fn loaded_policy_is_validated() {
    let err = StackPolicy::from_toml_str("[layout]\nbase_open_fraction = 2.0")
        .and_then(StackPolicy::validated)
        .unwrap_err();
    match err {
        PolicyConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("base_open_fraction"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loaded_breakpoint_drives_orientation() {
    let policy = StackPolicy::from_toml_str("breakpoint_px = 1200").unwrap();
    let stack = StackController::new(policy)
        .with_card_count(2)
        .with_container(1000.0, 800.0)
        .with_state(StackState::Open(0));
    assert!(stack.orientation().is_vertical());
    assert_eq!(stack.positions(), vec![0.0, 720.0]);
}

#[test]
fn frame_serializes_to_json() {
    let stack = StackController::default()
        .with_card_count(3)
        .with_container(390.0, 800.0)
        .with_state(StackState::Open(0));
    let value = serde_json::to_value(stack.frame()).unwrap();
    assert_eq!(value["state"]["kind"], "open");
    assert_eq!(value["state"]["index"], 0);
    assert_eq!(value["orientation"], "vertical");
    assert_eq!(value["cards"][1]["drag_role"], "next");
    assert_eq!(value["cards"][2]["transition_delay_ms"], 300);
    assert_eq!(value["cards"][2]["position"], 900.0);
}
