//! Pointer-stream properties for the drag tracker and classifier.
//!
//! Random pointer paths must always terminate in exactly one stack input per
//! press, and the classification of that input must only depend on the
//! final vertical offset.

use pagestack_core::{
    DragOffset, DragOutcome, DragRole, DragThresholds, DragTracker, StackInput, classify_drag,
};
use proptest::prelude::*;
use web_time::{Duration, Instant};

fn path_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-400.0f64..400.0, -400.0f64..400.0), 0..24)
}

proptest! {
    #[test]
    fn every_press_yields_one_input(path in path_strategy(), index in 0usize..6) {
        let mut tracker = DragTracker::default();
        let t = Instant::now();
        tracker.pointer_down(index, 0.0, 0.0, t);
        for &(x, y) in &path {
            tracker.pointer_move(x, y);
        }
        let (ux, uy) = path.last().copied().unwrap_or((0.0, 0.0));
        let out = tracker.pointer_up(ux, uy, t + Duration::from_millis(16));
        prop_assert!(out.is_some());
        prop_assert_eq!(out.and_then(|input| input.card_index()), Some(index));
        prop_assert!(!tracker.is_dragging());
        prop_assert_eq!(tracker.pointer_up(ux, uy, t), None);
    }

    #[test]
    fn classification_depends_only_on_vertical_offset(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        threshold in 1.0f64..300.0,
    ) {
        let thresholds = DragThresholds::uniform(threshold);
        for role in [DragRole::Active, DragRole::Next] {
            let a = classify_drag(DragOffset::new(x, y), thresholds, role);
            let b = classify_drag(DragOffset::new(0.0, y), thresholds, role);
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn active_never_opens_and_next_never_closes(y in -1000.0f64..1000.0) {
        let thresholds = DragThresholds::default();
        prop_assert_ne!(
            classify_drag(DragOffset::new(0.0, y), thresholds, DragRole::Active),
            DragOutcome::Open
        );
        prop_assert_ne!(
            classify_drag(DragOffset::new(0.0, y), thresholds, DragRole::Next),
            DragOutcome::Close
        );
    }
}

#[test]
fn cancelled_drag_classifies_as_bounce() {
    let mut tracker = DragTracker::default();
    let t = Instant::now();
    tracker.pointer_down(1, 0.0, 0.0, t);
    tracker.pointer_move(0.0, 400.0);
    let Some(StackInput::DragEnd { offset, .. }) = tracker.pointer_leave(t) else {
        panic!("expected a drag end");
    };
    assert_eq!(
        classify_drag(offset, DragThresholds::default(), DragRole::Active),
        DragOutcome::Cancel
    );
}
