#![forbid(unsafe_code)]

//! Stack axis geometry.
//!
//! The stack lays cards out along a single axis: horizontal on wide
//! containers, vertical on narrow ones. [`ViewportMetrics`] projects a
//! measured [`ContainerSize`] onto that axis. Metrics are derived on every
//! layout pass and never cached across resizes.

use serde::{Deserialize, Serialize};

/// Container width below which the stack switches to the vertical sheet layout.
pub const DEFAULT_BREAKPOINT_PX: f64 = 768.0;

/// The axis along which cards are offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Desktop: cards fan left to right, hover peeks are enabled.
    #[default]
    Horizontal,
    /// Mobile: cards slide up as sheets, drag gestures are enabled.
    Vertical,
}

impl Orientation {
    /// Map a measured container width to an orientation.
    ///
    /// Widths strictly below `breakpoint_px` are vertical.
    #[must_use]
    pub fn for_width(width: f64, breakpoint_px: f64) -> Self {
        if width < breakpoint_px {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Whether this is the mobile (vertical) orientation.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Stable label for logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Measured size of the scrollable stack container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    /// Create a new container size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Project onto the stack axis for the given orientation.
    #[must_use]
    pub fn metrics(self, orientation: Orientation) -> ViewportMetrics {
        ViewportMetrics::for_container(self, orientation)
    }
}

/// Container extents along and across the stack axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportMetrics {
    /// Size along the stack axis (width on desktop, height on mobile).
    pub main_axis_extent: f64,
    /// Size across the stack axis.
    pub cross_axis_extent: f64,
}

impl ViewportMetrics {
    /// Create metrics from explicit extents.
    #[must_use]
    pub const fn new(main_axis_extent: f64, cross_axis_extent: f64) -> Self {
        Self {
            main_axis_extent,
            cross_axis_extent,
        }
    }

    /// Derive metrics from a container size.
    #[must_use]
    pub fn for_container(size: ContainerSize, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(size.width, size.height),
            Orientation::Vertical => Self::new(size.height, size.width),
        }
    }
}

/// Pointer displacement of a finished drag, relative to where it started.
///
/// Positive `y` is downward (away from the top of the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragOffset {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl DragOffset {
    /// The zero offset, reported when a drag is cancelled.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new drag offset.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement along the stack axis.
    #[must_use]
    pub const fn along(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}
