#![forbid(unsafe_code)]

//! Canonical input events reported by the rendering collaborator.
//!
//! Every user interaction with the stack arrives as one [`StackInput`]. The
//! controller processes them strictly in arrival order, one at a time.
//!
//! # JSON form
//!
//! Events serialize as internally tagged objects, which is the format used by
//! replay scripts and the wasm boundary:
//!
//! ```json
//! {"kind":"click","index":1}
//! {"kind":"drag_end","index":1,"offset":{"x":0,"y":150}}
//! {"kind":"resize","width":1280,"height":800}
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::DragOffset;

/// A single input event delivered to the stack controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StackInput {
    /// A card was clicked (or tapped).
    Click { index: usize },
    /// A click landed outside the stack.
    ///
    /// `exempt` is true when the target sits inside a region that must not
    /// collapse the stack (an info drawer, for example). The ancestry check
    /// belongs to the collaborator.
    ClickOutside {
        #[serde(default)]
        exempt: bool,
    },
    /// The pointer entered a card.
    HoverEnter { index: usize },
    /// The pointer left the hovered card.
    HoverLeave,
    /// A drag on a card finished (or was cancelled, with a zero offset).
    DragEnd { index: usize, offset: DragOffset },
    /// Append a card at the tail and open it.
    AddCard,
    /// Remove the tail card.
    RemoveCard,
    /// The container was measured with a new size.
    Resize { width: f64, height: f64 },
}

impl StackInput {
    /// Stable label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::ClickOutside { .. } => "click_outside",
            Self::HoverEnter { .. } => "hover_enter",
            Self::HoverLeave => "hover_leave",
            Self::DragEnd { .. } => "drag_end",
            Self::AddCard => "add_card",
            Self::RemoveCard => "remove_card",
            Self::Resize { .. } => "resize",
        }
    }

    /// The card this event targets, if any.
    #[must_use]
    pub const fn card_index(&self) -> Option<usize> {
        match self {
            Self::Click { index } | Self::HoverEnter { index } | Self::DragEnd { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}
