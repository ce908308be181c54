#![forbid(unsafe_code)]

//! Hover peek offsets.
//!
//! A peek is a small additive nudge layered over the base positions. It
//! previews a card without opening it. Two cases:
//!
//! - hovering a **closed** card slides only that card toward the viewer by
//!   [`PEEK_CLOSED_OFFSET`];
//! - hovering an **open** card below the active one pushes every open card
//!   above it aside, by an amount read from [`PEEK_REVEAL_OFFSETS`].
//!
//! The reveal amounts come from a fixed table rather than a formula so the
//! effect looks the same at any stack depth.

/// Offset applied to a hovered closed card.
pub const PEEK_CLOSED_OFFSET: f64 = -20.0;

/// Push-aside offsets for open cards above a hovered open card, indexed by
/// [`peek_reveal_index`].
pub const PEEK_REVEAL_OFFSETS: [f64; 5] = [20.0, 30.0, 40.0, 50.0, 60.0];

/// Table index for an open card `distance` positions below the active card.
///
/// The active card itself has distance 0. Distances past the table reuse the
/// last entry.
#[inline]
#[must_use]
pub const fn peek_reveal_index(distance_from_active: usize) -> usize {
    let last = PEEK_REVEAL_OFFSETS.len() - 1;
    if distance_from_active < last {
        distance_from_active
    } else {
        last
    }
}

/// Push-aside offset for an open card `distance` positions below the active card.
#[inline]
#[must_use]
pub const fn peek_reveal_offset(distance_from_active: usize) -> f64 {
    PEEK_REVEAL_OFFSETS[peek_reveal_index(distance_from_active)]
}

/// Compute peek offsets for every card.
///
/// `active` is `None` for the idle stack, where every card counts as closed.
/// A hovered index outside the stack yields all zeros.
#[must_use]
pub fn stack_peek_offsets(peeked: Option<usize>, active: Option<usize>, total_cards: usize) -> Vec<f64> {
    let mut offsets = vec![0.0; total_cards];
    let Some(hovered) = peeked.filter(|&h| h < total_cards) else {
        return offsets;
    };

    match active {
        Some(active) if hovered == active => {}
        Some(active) if hovered < active => {
            let top = active.min(total_cards - 1);
            for (i, slot) in offsets
                .iter_mut()
                .enumerate()
                .take(top + 1)
                .skip(hovered + 1)
            {
                *slot = peek_reveal_offset(active - i);
            }
        }
        _ => offsets[hovered] = PEEK_CLOSED_OFFSET,
    }
    offsets
}

/// Flat-argument entry point used by the rendering boundary.
#[must_use]
pub fn compute_stack_peek_offsets(
    peeked_index: Option<usize>,
    active_index: i32,
    total_cards: usize,
) -> Vec<f64> {
    stack_peek_offsets(peeked_index, usize::try_from(active_index).ok(), total_cards)
}
