#![forbid(unsafe_code)]

//! Stack state and transition results.
//!
//! [`StackState`] is the tagged form of the active index: `Idle` is the fully
//! collapsed stack, `Open(k)` has card `k` active and every card below it
//! open. Only the controller constructs new states, through the named
//! transition helpers here, so the `[-1, N-1]` range holds after every input.

use std::fmt;

use pagestack_core::Orientation;

/// Which card (if any) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "index", rename_all = "snake_case")
)]
pub enum StackState {
    /// Nothing is open.
    #[default]
    Idle,
    /// Card `k` is active; cards `0..=k` are open.
    Open(usize),
}

impl StackState {
    /// Build a state from a signed active index (`-1` and below mean idle).
    #[must_use]
    pub fn from_index(active_index: i32) -> Self {
        usize::try_from(active_index).map_or(Self::Idle, Self::Open)
    }

    /// The active card, if any.
    #[inline]
    #[must_use]
    pub const fn active(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Open(k) => Some(k),
        }
    }

    /// Signed active index, `-1` when idle.
    #[must_use]
    pub fn active_index(self) -> i32 {
        match self {
            Self::Idle => -1,
            Self::Open(k) => i32::try_from(k).unwrap_or(i32::MAX),
        }
    }

    /// Whether the stack is fully collapsed.
    #[inline]
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Close one level: `Open(k)` becomes `Open(k - 1)`, `Open(0)` becomes idle.
    #[must_use]
    pub const fn close_one(self) -> Self {
        match self {
            Self::Idle | Self::Open(0) => Self::Idle,
            Self::Open(k) => Self::Open(k - 1),
        }
    }

    /// Open one level, capped at the last card. Requires a non-empty stack.
    #[must_use]
    pub fn open_one(self, card_count: usize) -> Self {
        debug_assert!(card_count > 0);
        let next = self.active().map_or(0, |k| k + 1);
        Self::Open(next.min(card_count.saturating_sub(1)))
    }

    /// Clamp into a stack of `card_count` cards.
    ///
    /// An active index past the end moves to the last card; an empty stack is
    /// always idle.
    #[must_use]
    pub fn clamp_to(self, card_count: usize) -> Self {
        match self {
            Self::Idle => Self::Idle,
            _ if card_count == 0 => Self::Idle,
            Self::Open(k) if k >= card_count => Self::Open(card_count - 1),
            open => open,
        }
    }

    /// Whether this state is valid for a stack of `card_count` cards.
    #[must_use]
    pub fn is_valid_for(self, card_count: usize) -> bool {
        self.active().is_none_or(|k| k < card_count)
    }
}

impl fmt::Display for StackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Open(k) => write!(f, "open({k})"),
        }
    }
}

/// Why an input left the stack untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The input named a card that does not exist.
    CardOutOfRange { index: usize, count: usize },
    /// A drag ended on a card that is neither active nor next.
    NotDraggable { index: usize },
    /// Hover peeks only exist in the horizontal orientation.
    HoverOnVertical,
    /// Drag gestures only exist in the vertical orientation.
    DragOnHorizontal,
    /// The outside click landed in an exempt region.
    ExemptRegion,
    /// There is no card to remove.
    EmptyStack,
    /// The resize reported a non-finite or negative size.
    InvalidSize,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardOutOfRange { index, count } => {
                write!(f, "card {index} out of range for {count} cards")
            }
            Self::NotDraggable { index } => write!(f, "card {index} is not draggable"),
            Self::HoverOnVertical => write!(f, "hover ignored in vertical orientation"),
            Self::DragOnHorizontal => write!(f, "drag ignored in horizontal orientation"),
            Self::ExemptRegion => write!(f, "click inside exempt region"),
            Self::EmptyStack => write!(f, "stack is empty"),
            Self::InvalidSize => write!(f, "invalid container size"),
        }
    }
}

/// Result of feeding one input to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// The active card changed.
    Changed { from: StackState, to: StackState },
    /// A card was added or removed; the state may have been clamped.
    Restacked {
        count: usize,
        from: StackState,
        to: StackState,
    },
    /// A drag did not reach its threshold. The renderer re-commits `target`.
    Bounce { index: usize, target: f64 },
    /// The hovered card changed.
    PeekChanged {
        from: Option<usize>,
        to: Option<usize>,
    },
    /// The container was re-measured.
    Resized { orientation: Orientation },
    /// The input was valid but changed nothing.
    Unchanged,
    /// The input was rejected.
    Ignored(IgnoreReason),
}

impl Transition {
    /// Whether the layout should be recomputed after this transition.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        !matches!(self, Self::Unchanged | Self::Ignored(_))
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Changed { .. } => "changed",
            Self::Restacked { .. } => "restacked",
            Self::Bounce { .. } => "bounce",
            Self::PeekChanged { .. } => "peek_changed",
            Self::Resized { .. } => "resized",
            Self::Unchanged => "unchanged",
            Self::Ignored(_) => "ignored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_index_round_trip() {
        assert_eq!(StackState::from_index(-1), StackState::Idle);
        assert_eq!(StackState::from_index(-7), StackState::Idle);
        assert_eq!(StackState::from_index(3), StackState::Open(3));
        assert_eq!(StackState::Open(3).active_index(), 3);
        assert_eq!(StackState::Idle.active_index(), -1);
    }

    #[test]
    fn close_one_bottoms_out_at_idle() {
        assert_eq!(StackState::Open(2).close_one(), StackState::Open(1));
        assert_eq!(StackState::Open(0).close_one(), StackState::Idle);
        assert_eq!(StackState::Idle.close_one(), StackState::Idle);
    }

    #[test]
    fn open_one_caps_at_last_card() {
        assert_eq!(StackState::Idle.open_one(3), StackState::Open(0));
        assert_eq!(StackState::Open(1).open_one(3), StackState::Open(2));
        assert_eq!(StackState::Open(2).open_one(3), StackState::Open(2));
    }

    #[test]
    fn clamp_to_count() {
        assert_eq!(StackState::Open(2).clamp_to(2), StackState::Open(1));
        assert_eq!(StackState::Open(1).clamp_to(2), StackState::Open(1));
        assert_eq!(StackState::Open(0).clamp_to(0), StackState::Idle);
        assert_eq!(StackState::Idle.clamp_to(5), StackState::Idle);
    }

    #[test]
    fn validity() {
        assert!(StackState::Idle.is_valid_for(0));
        assert!(StackState::Open(1).is_valid_for(2));
        assert!(!StackState::Open(2).is_valid_for(2));
    }

    #[test]
    fn display_labels() {
        assert_eq!(StackState::Idle.to_string(), "idle");
        assert_eq!(StackState::Open(4).to_string(), "open(4)");
        assert_eq!(
            IgnoreReason::CardOutOfRange { index: 5, count: 3 }.to_string(),
            "card 5 out of range for 3 cards"
        );
    }

    #[test]
    fn only_effective_transitions_need_layout() {
        assert!(
            Transition::Changed {
                from: StackState::Idle,
                to: StackState::Open(0)
            }
            .needs_layout()
        );
        assert!(!Transition::Unchanged.needs_layout());
        assert!(!Transition::Ignored(IgnoreReason::EmptyStack).needs_layout());
    }
}
