#![forbid(unsafe_code)]

//! Tunable parameters for the stack solvers.
//!
//! Defaults reproduce the production look of the stack. The offset tables
//! themselves are fixed constants in [`crate::positions`] and
//! [`crate::peek`]; only counts and spacing are tunable.

use serde::{Deserialize, Serialize};

/// Fraction of the main-axis extent where the open fan starts.
pub const BASE_OPEN_FRACTION: f64 = 0.2;
/// Spacing multiplier step between fanned cards (px).
pub const STACK_INCREMENT: f64 = 30.0;
/// Open cards fanned before older ones stack flat at the base.
pub const MAX_CARDS_OPEN: usize = 5;
/// Closed cards fanned before later ones stack flat at the far edge.
pub const MAX_CARDS_CLOSED: usize = 2;
/// Cards fanned in the idle (collapsed) stack.
pub const MAX_CARDS_COLLAPSED: usize = 4;
/// Visible height of the card peeking from the bottom on mobile (px).
pub const MOBILE_PEEK_HEIGHT: f64 = 80.0;
/// Distance past the bottom edge where hidden mobile cards wait (px).
pub const MOBILE_OFFSCREEN_MARGIN: f64 = 100.0;

/// Spacing and visibility windows for the desktop fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackTuning {
    pub max_open_visible: usize,
    pub max_closed_visible: usize,
    pub max_collapsed_visible: usize,
    pub stack_increment: f64,
    pub base_open_fraction: f64,
}

impl Default for StackTuning {
    fn default() -> Self {
        Self {
            max_open_visible: MAX_CARDS_OPEN,
            max_closed_visible: MAX_CARDS_CLOSED,
            max_collapsed_visible: MAX_CARDS_COLLAPSED,
            stack_increment: STACK_INCREMENT,
            base_open_fraction: BASE_OPEN_FRACTION,
        }
    }
}

impl StackTuning {
    /// Override the open/closed visibility windows (builder pattern).
    #[must_use]
    pub fn with_windows(mut self, max_open_visible: usize, max_closed_visible: usize) -> Self {
        self.max_open_visible = max_open_visible;
        self.max_closed_visible = max_closed_visible;
        self
    }

    /// Left-most position of an open card for the given extent.
    #[inline]
    #[must_use]
    pub fn base_open_position(&self, main_axis_extent: f64) -> f64 {
        main_axis_extent * self.base_open_fraction
    }
}

/// Sheet geometry for the vertical (mobile) stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileTuning {
    pub peek_height: f64,
    pub offscreen_margin: f64,
}

impl Default for MobileTuning {
    fn default() -> Self {
        Self {
            peek_height: MOBILE_PEEK_HEIGHT,
            offscreen_margin: MOBILE_OFFSCREEN_MARGIN,
        }
    }
}
