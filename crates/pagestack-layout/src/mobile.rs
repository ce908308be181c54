#![forbid(unsafe_code)]

//! Sheet layout for the vertical (mobile) stack.
//!
//! The fan formula does not apply on mobile. Each card is in one of three
//! places: fully on screen (offset 0), peeking from the bottom edge, or parked
//! below the viewport.

use crate::tuning::MobileTuning;

/// Where a card sits in the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSlot {
    /// Fully on screen, covering the cards below it in index order.
    OnScreen,
    /// Showing only the peek strip at the bottom edge.
    Peeking,
    /// Below the viewport.
    Offscreen,
}

/// Slot for card `index` given the active card.
#[must_use]
pub fn sheet_slot(index: usize, active: Option<usize>) -> SheetSlot {
    match active {
        None if index == 0 => SheetSlot::Peeking,
        None => SheetSlot::Offscreen,
        Some(active) if index <= active => SheetSlot::OnScreen,
        Some(active) if index == active + 1 => SheetSlot::Peeking,
        Some(_) => SheetSlot::Offscreen,
    }
}

/// Compute vertical offsets for every card.
#[must_use]
pub fn mobile_positions(
    active: Option<usize>,
    total_cards: usize,
    main_axis_extent: f64,
    tuning: &MobileTuning,
) -> Vec<f64> {
    let peek = main_axis_extent - tuning.peek_height;
    let offscreen = main_axis_extent + tuning.offscreen_margin;
    (0..total_cards)
        .map(|index| match sheet_slot(index, active) {
            SheetSlot::OnScreen => 0.0,
            SheetSlot::Peeking => peek,
            SheetSlot::Offscreen => offscreen,
        })
        .collect()
}
