#![forbid(unsafe_code)]

//! Per-card render targets for one layout pass.
//!
//! A [`StackFrame`] is everything a renderer needs to commit one pass: the
//! state it was derived from, the orientation and extents, and a
//! [`CardFrame`] per card with its target position and gesture affordances.
//! Frames are plain data and never borrow from the controller.

#[cfg(feature = "serde")]
use serde::Serialize;

use pagestack_core::{DragRole, Orientation, ViewportMetrics};
use web_time::Duration;

use crate::state::StackState;

/// Render target for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CardFrame {
    /// Position in the stack (0 is the bottom card).
    pub index: usize,
    /// Offset from the position solver.
    pub base: f64,
    /// Additive hover offset.
    pub peek: f64,
    /// Final offset along the stack axis (`base + peek`).
    pub position: f64,
    /// Whether this is the active card.
    pub is_active: bool,
    /// Drag affordance on mobile, `None` when the card cannot be dragged.
    pub drag_role: Option<DragRole>,
    /// Delay before the renderer starts tweening this card.
    #[cfg_attr(feature = "serde", serde(rename = "transition_delay_ms", serialize_with = "serialize_millis"))]
    pub transition_delay: Duration,
}

impl CardFrame {
    /// Whether the card accepts drag gestures.
    #[inline]
    #[must_use]
    pub const fn draggable(&self) -> bool {
        self.drag_role.is_some()
    }
}

/// One full layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StackFrame {
    pub state: StackState,
    pub peeked: Option<usize>,
    pub orientation: Orientation,
    pub metrics: ViewportMetrics,
    pub cards: Vec<CardFrame>,
}

impl StackFrame {
    /// Signed active index, `-1` when idle.
    #[must_use]
    pub fn active_index(&self) -> i32 {
        self.state.active_index()
    }

    /// Final positions, in card order.
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        self.cards.iter().map(|c| c.position).collect()
    }

    /// Number of cards in the pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pass has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Indices of cards that currently accept drags.
    pub fn draggable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards.iter().filter(|c| c.draggable()).map(|c| c.index)
    }
}

#[cfg(feature = "serde")]
fn serialize_millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(index: usize, position: f64, drag_role: Option<DragRole>) -> CardFrame {
        CardFrame {
            index,
            base: position,
            peek: 0.0,
            position,
            is_active: false,
            drag_role,
            transition_delay: Duration::ZERO,
        }
    }

    #[test]
    fn frame_accessors() {
        let frame = StackFrame {
            state: StackState::Open(0),
            peeked: None,
            orientation: Orientation::Vertical,
            metrics: ViewportMetrics::new(800.0, 390.0),
            cards: vec![
                card(0, 0.0, Some(DragRole::Active)),
                card(1, 720.0, Some(DragRole::Next)),
                card(2, 900.0, None),
            ],
        };
        assert_eq!(frame.active_index(), 0);
        assert_eq!(frame.positions(), vec![0.0, 720.0, 900.0]);
        assert_eq!(frame.draggable_indices().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(frame.len(), 3);
        assert!(!frame.is_empty());
    }

    #[test]
    fn default_frame_is_empty_and_idle() {
        let frame = StackFrame::default();
        assert!(frame.is_empty());
        assert_eq!(frame.active_index(), -1);
    }
}
