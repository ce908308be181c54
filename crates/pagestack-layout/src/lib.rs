#![forbid(unsafe_code)]

//! Layout primitives and solvers for the card stack.
//!
//! Three pure solvers live here:
//!
//! - [`positions`]: the desktop fan (open/closed/collapsed segments, overflow
//!   windows, width-aware visual cap);
//! - [`mobile`]: the vertical sheet layout;
//! - [`peek`]: additive hover offsets.
//!
//! [`StackLayout`] bundles orientation and tuning and dispatches to the right
//! solver, the same way a flex container dispatches on its direction.

pub mod mobile;
pub mod peek;
pub mod positions;
pub mod tuning;

pub use mobile::{SheetSlot, mobile_positions, sheet_slot};
pub use pagestack_core::geometry::{Orientation, ViewportMetrics};
pub use peek::{
    PEEK_CLOSED_OFFSET, PEEK_REVEAL_OFFSETS, compute_stack_peek_offsets, peek_reveal_index,
    peek_reveal_offset, stack_peek_offsets,
};
pub use positions::{
    CLOSED_APPROACHING_OFFSETS, COLLAPSED_APPROACHING_OFFSETS, OPEN_APPROACHING_OFFSETS,
    compute_stack_positions, stack_positions,
};
pub use tuning::{MobileTuning, StackTuning};

/// Base and peek offsets for one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackSolution {
    /// Offsets from the position solver.
    pub base: Vec<f64>,
    /// Additive hover offsets (all zero on mobile).
    pub peek: Vec<f64>,
}

impl StackSolution {
    /// Number of cards laid out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Final coordinate for every card (`base + peek`).
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        self.base
            .iter()
            .zip(&self.peek)
            .map(|(base, peek)| base + peek)
            .collect()
    }
}

/// Orientation-aware stack layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackLayout {
    orientation: Orientation,
    tuning: StackTuning,
    mobile: MobileTuning,
}

impl StackLayout {
    /// Create a new horizontal (desktop) layout.
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Create a new vertical (mobile) layout.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            ..Default::default()
        }
    }

    /// Set the orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the desktop fan tuning.
    pub fn tuning(mut self, tuning: StackTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the mobile sheet tuning.
    pub fn mobile(mut self, mobile: MobileTuning) -> Self {
        self.mobile = mobile;
        self
    }

    /// Current orientation.
    pub fn current_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Base positions for every card.
    ///
    /// `card_sizes` only matters on desktop; mobile uses the fixed peek height.
    pub fn base_positions(
        &self,
        active: Option<usize>,
        total_cards: usize,
        metrics: ViewportMetrics,
        card_sizes: Option<&[f64]>,
    ) -> Vec<f64> {
        match self.orientation {
            Orientation::Horizontal => stack_positions(
                active,
                total_cards,
                metrics.main_axis_extent,
                &self.tuning,
                card_sizes,
            ),
            Orientation::Vertical => {
                mobile_positions(active, total_cards, metrics.main_axis_extent, &self.mobile)
            }
        }
    }

    /// Peek offsets for every card. Mobile has no hover, so it is all zeros.
    pub fn peek_offsets(
        &self,
        peeked: Option<usize>,
        active: Option<usize>,
        total_cards: usize,
    ) -> Vec<f64> {
        match self.orientation {
            Orientation::Horizontal => stack_peek_offsets(peeked, active, total_cards),
            Orientation::Vertical => vec![0.0; total_cards],
        }
    }

    /// Run both solvers for one layout pass.
    pub fn solve(
        &self,
        active: Option<usize>,
        peeked: Option<usize>,
        total_cards: usize,
        metrics: ViewportMetrics,
        card_sizes: Option<&[f64]>,
    ) -> StackSolution {
        StackSolution {
            base: self.base_positions(active, total_cards, metrics, card_sizes),
            peek: self.peek_offsets(peeked, active, total_cards),
        }
    }
}
