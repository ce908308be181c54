#![forbid(unsafe_code)]

//! Base position solver for the card stack.
//!
//! Computes one offset per card along the stack axis. Cards split into two
//! segments around the active card:
//!
//! - **Open** (`index <= active`): fanned rightward from the base open
//!   position (20% of the extent). Each card adds an approaching offset from
//!   [`OPEN_APPROACHING_OFFSETS`] plus a growing multiple of the increment.
//! - **Closed** (`index > active`): stacked against the far edge, pulled
//!   inward by [`CLOSED_APPROACHING_OFFSETS`] and a shrinking multiple of the
//!   increment, so the next card to open visibly peeks.
//!
//! With no active card every card uses the closed formula with the wider
//! [`COLLAPSED_APPROACHING_OFFSETS`] table.
//!
//! # Overflow
//!
//! Each segment fans at most a window of cards. Open cards older than the
//! window sit exactly at the base position; closed and collapsed cards past
//! their window sit exactly at the far edge. They stay logically present and
//! slide in when the window shifts.
//!
//! # Visual cap
//!
//! When per-card widths are supplied, the visible open window is walked from
//! the active card down and each position is raised to
//! `next_position - own_width`, so no card slides further under its
//! neighbour than its own width.
//!
//! # Invariants
//!
//! 1. Output length equals `total_cards`, in index order.
//! 2. Pure: identical inputs give identical outputs.
//! 3. Never panics. Inputs are assumed validated by the caller; an active
//!    index past the end only fills the cards that exist, and a width slice of
//!    the wrong length disables the cap.

use crate::tuning::StackTuning;

/// Approaching offsets for open cards, indexed by distance from the active card.
pub const OPEN_APPROACHING_OFFSETS: [f64; 5] = [80.0, 40.0, 20.0, 10.0, 0.0];
/// Approaching offsets for closed cards, indexed by distance past the active card.
pub const CLOSED_APPROACHING_OFFSETS: [f64; 2] = [20.0, 0.0];
/// Approaching offsets for the idle stack, indexed by card index.
pub const COLLAPSED_APPROACHING_OFFSETS: [f64; 4] = [180.0, 90.0, 30.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Open,
    Closed,
    Collapsed,
}

impl Segment {
    fn table(self) -> &'static [f64] {
        match self {
            Self::Open => &OPEN_APPROACHING_OFFSETS,
            Self::Closed => &CLOSED_APPROACHING_OFFSETS,
            Self::Collapsed => &COLLAPSED_APPROACHING_OFFSETS,
        }
    }

    fn window(self, tuning: &StackTuning) -> usize {
        match self {
            Self::Open => tuning.max_open_visible,
            Self::Closed => tuning.max_closed_visible,
            Self::Collapsed => tuning.max_collapsed_visible,
        }
    }
}

/// Table lookup, clamped to the last entry.
fn approaching_offset(segment: Segment, local: usize, segment_len: usize) -> f64 {
    let table = segment.table();
    let count = match segment {
        Segment::Open => segment_len - local - 1,
        Segment::Closed | Segment::Collapsed => local,
    };
    table[count.min(table.len() - 1)]
}

fn increment_multiplier(segment: Segment, local: usize, segment_len: usize, window: usize) -> f64 {
    match segment {
        Segment::Open if segment_len <= window => local as f64,
        Segment::Open => (window + local).saturating_sub(segment_len) as f64,
        Segment::Closed | Segment::Collapsed => window.saturating_sub(local) as f64,
    }
}

fn segment_position(
    segment: Segment,
    local: usize,
    segment_len: usize,
    extent: f64,
    tuning: &StackTuning,
) -> f64 {
    let window = segment.window(tuning);
    match segment {
        Segment::Open => {
            let base = tuning.base_open_position(extent);
            // The boundary card of an overflowing fan flattens onto the base
            // together with the hidden cards.
            if segment_len > window && local < segment_len - window + 1 {
                return base;
            }
            base + approaching_offset(segment, local, segment_len)
                + increment_multiplier(segment, local, segment_len, window) * tuning.stack_increment
        }
        Segment::Closed | Segment::Collapsed => {
            if local >= window {
                return extent;
            }
            extent
                - approaching_offset(segment, local, segment_len)
                - increment_multiplier(segment, local, segment_len, window) * tuning.stack_increment
        }
    }
}

/// Compute base positions for every card.
///
/// `active` is `None` for the idle (collapsed) stack. `card_sizes`, when its
/// length matches `total_cards`, enables the visual cap.
#[must_use]
pub fn stack_positions(
    active: Option<usize>,
    total_cards: usize,
    main_axis_extent: f64,
    tuning: &StackTuning,
    card_sizes: Option<&[f64]>,
) -> Vec<f64> {
    let mut positions = vec![0.0; total_cards];
    if total_cards == 0 {
        return positions;
    }

    let Some(active) = active else {
        for (i, slot) in positions.iter_mut().enumerate() {
            *slot = segment_position(Segment::Collapsed, i, total_cards, main_axis_extent, tuning);
        }
        return positions;
    };

    let open_len = active + 1;
    for (i, slot) in positions.iter_mut().enumerate().take(open_len) {
        *slot = segment_position(Segment::Open, i, open_len, main_axis_extent, tuning);
    }

    let closed_len = total_cards.saturating_sub(open_len);
    for j in 0..closed_len {
        positions[open_len + j] =
            segment_position(Segment::Closed, j, closed_len, main_axis_extent, tuning);
    }

    if let Some(widths) = card_sizes.filter(|w| w.len() == total_cards) {
        apply_visual_cap(&mut positions, active, main_axis_extent, tuning, widths);
    }

    positions
}

/// Raise each visible open card so it sits at most its own width under the
/// card above it. Walks top-down so every step sees the already-capped
/// neighbour.
fn apply_visual_cap(
    positions: &mut [f64],
    active: usize,
    main_axis_extent: f64,
    tuning: &StackTuning,
    widths: &[f64],
) {
    let total = positions.len();
    let top = active.min(total - 1);
    for i in (0..=top).rev() {
        if active - i >= tuning.max_open_visible {
            break;
        }
        let reference = if i + 1 < total {
            positions[i + 1]
        } else {
            main_axis_extent
        };
        positions[i] = positions[i].max(reference - widths[i]);
    }
}

/// Flat-argument entry point used by the rendering boundary.
///
/// `active_index` of `-1` (or any negative value) selects the idle stack.
#[must_use]
pub fn compute_stack_positions(
    active_index: i32,
    total_cards: usize,
    main_axis_extent: f64,
    max_open_visible: usize,
    max_closed_visible: usize,
    card_sizes: Option<&[f64]>,
) -> Vec<f64> {
    let tuning = StackTuning::default().with_windows(max_open_visible, max_closed_visible);
    let active = usize::try_from(active_index).ok();
    stack_positions(active, total_cards, main_axis_extent, &tuning, card_sizes)
}
