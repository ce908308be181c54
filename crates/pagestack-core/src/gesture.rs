#![forbid(unsafe_code)]

//! Drag gesture interpretation for the vertical (mobile) stack.
//!
//! Two pieces live here:
//!
//! - [`classify_drag`] is a pure function that turns a finished drag's offset
//!   into a [`DragOutcome`]. It knows nothing about pointer events or
//!   animation callbacks, so it can be tested in isolation.
//! - [`DragTracker`] is a small stateful processor that turns raw pointer
//!   down/move/up/leave notifications into [`StackInput`] values: either a
//!   `Click` or a `DragEnd`, never both for the same press.
//!
//! # Invariants
//!
//! 1. A press that never travels `start_distance` emits `Click`, not `DragEnd`.
//! 2. A started drag always terminates in exactly one `DragEnd`, including
//!    when the pointer leaves the tracked region (zero offset).
//! 3. After `reset()` the tracker is idle and emits nothing until the next press.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::event::StackInput;
use crate::geometry::DragOffset;

/// Default distance (px) a drag must travel to change the open level.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 120.0;

/// Default distance (px) a press must travel before it counts as a drag.
pub const DEFAULT_DRAG_START_PX: f64 = 3.0;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// What a draggable card is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragRole {
    /// The active card: dragging it down closes one level.
    Active,
    /// The card peeking below the active one: dragging it up opens it.
    Next,
}

impl DragRole {
    /// Whether the renderer should stop this card from moving upward.
    ///
    /// The active card can only be pulled down. The next card is
    /// unconstrained so that it does not jump when grabbed.
    #[must_use]
    pub const fn blocks_upward(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Stable label for logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Next => "next",
        }
    }
}

/// Distances a drag must exceed, per direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragThresholds {
    /// Downward travel needed to close the active card.
    pub close_px: f64,
    /// Upward travel needed to open the next card.
    pub open_px: f64,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self::uniform(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragThresholds {
    /// Same threshold in both directions.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self {
            close_px: px,
            open_px: px,
        }
    }
}

/// Result of classifying a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragOutcome {
    /// Close the active card (go back one level).
    Close,
    /// Open the next card (go forward one level).
    Open,
    /// Threshold not reached: bounce back to the current target.
    Cancel,
}

/// Classify a finished vertical drag.
///
/// Comparisons are strict: an offset exactly equal to the threshold cancels.
#[must_use]
pub fn classify_drag(offset: DragOffset, thresholds: DragThresholds, role: DragRole) -> DragOutcome {
    match role {
        DragRole::Active if offset.y > thresholds.close_px => DragOutcome::Close,
        DragRole::Next if offset.y < -thresholds.open_px => DragOutcome::Open,
        _ => DragOutcome::Cancel,
    }
}

// ---------------------------------------------------------------------------
// DragTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Press {
    index: usize,
    start: (f64, f64),
    last: (f64, f64),
    at: Instant,
    started: bool,
}

/// Turns raw pointer notifications on a card into stack inputs.
#[derive(Debug, Clone)]
pub struct DragTracker {
    start_distance: f64,
    press: Option<Press>,
    last_duration: Option<Duration>,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_START_PX)
    }
}

impl DragTracker {
    /// Create a tracker that starts a drag after `start_distance` px of travel.
    #[must_use]
    pub fn new(start_distance: f64) -> Self {
        Self {
            start_distance: start_distance.max(0.0),
            press: None,
            last_duration: None,
        }
    }

    /// Pointer pressed on card `index` at `(x, y)`.
    ///
    /// A press while another is tracked replaces it; only one drag is
    /// tracked at a time.
    pub fn pointer_down(&mut self, index: usize, x: f64, y: f64, now: Instant) {
        self.press = Some(Press {
            index,
            start: (x, y),
            last: (x, y),
            at: now,
            started: false,
        });
    }

    /// Pointer moved to `(x, y)` while pressed.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if !press.started {
            let travelled = (x - press.start.0).abs() + (y - press.start.1).abs();
            if travelled >= self.start_distance {
                press.started = true;
            }
        }
        press.last = (x, y);
    }

    /// Pointer released at `(x, y)`.
    ///
    /// Emits `DragEnd` if the press became a drag, `Click` otherwise.
    pub fn pointer_up(&mut self, x: f64, y: f64, now: Instant) -> Option<StackInput> {
        self.pointer_move(x, y);
        let press = self.press.take()?;
        self.last_duration = Some(now.saturating_duration_since(press.at));
        if press.started {
            Some(StackInput::DragEnd {
                index: press.index,
                offset: DragOffset::new(x - press.start.0, y - press.start.1),
            })
        } else {
            Some(StackInput::Click { index: press.index })
        }
    }

    /// Pointer left the tracked region.
    ///
    /// A started drag ends with a zero offset, which classifies as a bounce.
    pub fn pointer_leave(&mut self, now: Instant) -> Option<StackInput> {
        let press = self.press.take()?;
        self.last_duration = Some(now.saturating_duration_since(press.at));
        press.started.then_some(StackInput::DragEnd {
            index: press.index,
            offset: DragOffset::ZERO,
        })
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.started)
    }

    /// Offset of the in-progress drag, if any.
    #[must_use]
    pub fn live_offset(&self) -> Option<DragOffset> {
        self.press
            .filter(|p| p.started)
            .map(|p| DragOffset::new(p.last.0 - p.start.0, p.last.1 - p.start.1))
    }

    /// How long the most recently finished press lasted.
    #[must_use]
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    /// Drop any tracked press without emitting anything.
    pub fn reset(&mut self) {
        self.press = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
