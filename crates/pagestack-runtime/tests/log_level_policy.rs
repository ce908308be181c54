#![forbid(unsafe_code)]

//! Logging policy for the controller.
//!
//! - Transitions are DEBUG events on the `pagestack.controller` target.
//! - Out-of-range card indices are WARN events carrying `index` and `count`.
//! - Orientation mismatches are DEBUG, never WARN.
//! - Every event carries structured fields beyond the message.
//!
//! Run:
//!   cargo test -p pagestack-runtime --test log_level_policy

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pagestack_core::DragOffset;
use pagestack_runtime::{StackController, StackState};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn has_structured_fields(&self) -> bool {
        self.fields.keys().any(|k| k != "message")
    }
}

#[derive(Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn capture(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let layer = EventCapture::default();
    let events = layer.events.clone();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

#[test]
fn transitions_log_at_debug() {
    let events = capture(|| {
        let mut stack = StackController::default()
            .with_card_count(3)
            .with_container(1000.0, 700.0);
        stack.on_card_click(1);
    });
    let transition = events
        .iter()
        .find(|e| e.fields.get("message").is_some_and(|m| m.contains("stack transition")))
        .expect("transition event");
    assert_eq!(transition.level, tracing::Level::DEBUG);
    assert_eq!(transition.target, "pagestack.controller");
    assert_eq!(transition.fields["from"], "idle");
    assert_eq!(transition.fields["to"], "open(1)");
}

#[test]
fn out_of_range_logs_warn_with_context() {
    let events = capture(|| {
        let mut stack = StackController::default().with_card_count(2);
        stack.on_card_click(9);
    });
    let warns: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].fields["index"], "9");
    assert_eq!(warns[0].fields["count"], "2");
}

#[test]
fn orientation_mismatch_is_not_a_warning() {
    let events = capture(|| {
        let mut stack = StackController::default()
            .with_card_count(3)
            .with_container(1000.0, 700.0)
            .with_state(StackState::Open(1));
        stack.on_drag_end(1, DragOffset::new(0.0, 300.0));
        stack.on_resize(390.0, 800.0);
        stack.on_card_hover_enter(0);
    });
    assert!(events.iter().all(|e| e.level != tracing::Level::WARN));
    assert!(
        events
            .iter()
            .any(|e| e.fields.get("reason").is_some_and(|r| r.contains("vertical")))
    );
}

#[test]
fn every_event_is_structured() {
    let events = capture(|| {
        let mut stack = StackController::default()
            .with_card_count(3)
            .with_container(390.0, 800.0);
        stack.on_card_click(0);
        stack.on_drag_end(0, DragOffset::new(0.0, 40.0));
        stack.on_drag_end(0, DragOffset::new(0.0, 400.0));
        stack.on_add_card();
        stack.on_remove_card();
        stack.on_click_outside(true);
        let _ = stack.frame();
    });
    assert!(!events.is_empty());
    for event in &events {
        assert!(event.has_structured_fields(), "unstructured event: {event:?}");
        assert_eq!(event.target, "pagestack.controller");
    }
}
