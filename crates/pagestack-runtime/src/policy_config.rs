#![forbid(unsafe_code)]

//! Policy-as-data configuration for the stack controller.
//!
//! Every tunable the controller and solvers read lives in one [`StackPolicy`]
//! that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # pagestack-policy.toml
//! breakpoint_px = 900
//!
//! [layout]
//! max_open_visible = 4
//!
//! [gesture]
//! close_px = 96
//! ```
//!
//! ```rust,ignore
//! let policy = StackPolicy::from_toml_file("pagestack-policy.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `StackPolicy::default()` reproduces the production constants: windows of
//! 5/2/4 cards, a 30 px increment, a base at 20% of the extent, an 80 px mobile
//! peek, 120 px drag thresholds, a 768 px breakpoint and 500 px cards.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pagestack_core::DragThresholds;
use pagestack_core::geometry::DEFAULT_BREAKPOINT_PX;
use pagestack_layout::{MobileTuning, StackLayout, StackTuning};
use web_time::Duration;

/// Default card width (px) used by `add_card` when no width is supplied.
pub const DEFAULT_CARD_WIDTH_PX: f64 = 500.0;

// ---------------------------------------------------------------------------
// Top-level StackPolicy
// ---------------------------------------------------------------------------

/// All tunables for one stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackPolicy {
    /// Desktop fan windows and increments.
    pub layout: StackTuning,
    /// Mobile sheet geometry.
    pub mobile: MobileTuning,
    /// Drag distances on mobile.
    pub gesture: DragThresholds,
    /// Animation hints handed to the renderer.
    pub motion: MotionPolicy,
    /// Widths strictly below this are laid out vertically. Default: 768.
    pub breakpoint_px: f64,
    /// Width given to cards created by `add_card`. Default: 500.
    pub default_card_width: f64,
}

impl Default for StackPolicy {
    fn default() -> Self {
        Self {
            layout: StackTuning::default(),
            mobile: MobileTuning::default(),
            gesture: DragThresholds::default(),
            motion: MotionPolicy::default(),
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            default_card_width: DEFAULT_CARD_WIDTH_PX,
        }
    }
}

impl StackPolicy {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        toml::from_str(s).map_err(PolicyConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str(s).map_err(PolicyConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the policy
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.layout.max_open_visible == 0 {
            errors.push("layout.max_open_visible must be > 0".into());
        }
        if !self.layout.stack_increment.is_finite() || self.layout.stack_increment < 0.0 {
            errors.push(format!(
                "layout.stack_increment must be finite and >= 0, got {}",
                self.layout.stack_increment
            ));
        }
        if !(0.0..=1.0).contains(&self.layout.base_open_fraction) {
            errors.push(format!(
                "layout.base_open_fraction must be in [0, 1], got {}",
                self.layout.base_open_fraction
            ));
        }

        if !self.mobile.peek_height.is_finite() || self.mobile.peek_height < 0.0 {
            errors.push(format!(
                "mobile.peek_height must be finite and >= 0, got {}",
                self.mobile.peek_height
            ));
        }
        if !self.mobile.offscreen_margin.is_finite() || self.mobile.offscreen_margin < 0.0 {
            errors.push(format!(
                "mobile.offscreen_margin must be finite and >= 0, got {}",
                self.mobile.offscreen_margin
            ));
        }

        if !(self.gesture.close_px > 0.0) {
            errors.push(format!(
                "gesture.close_px must be > 0, got {}",
                self.gesture.close_px
            ));
        }
        if !(self.gesture.open_px > 0.0) {
            errors.push(format!(
                "gesture.open_px must be > 0, got {}",
                self.gesture.open_px
            ));
        }

        for (i, x) in [self.motion.easing[0], self.motion.easing[2]].iter().enumerate() {
            if !(0.0..=1.0).contains(x) {
                errors.push(format!(
                    "motion.easing x{} must be in [0, 1], got {x}",
                    i + 1
                ));
            }
        }

        if !(self.breakpoint_px > 0.0) {
            errors.push(format!(
                "breakpoint_px must be > 0, got {}",
                self.breakpoint_px
            ));
        }
        if !(self.default_card_width > 0.0) {
            errors.push(format!(
                "default_card_width must be > 0, got {}",
                self.default_card_width
            ));
        }

        errors
    }

    /// Return `self` if it validates, otherwise every collected error.
    pub fn validated(self) -> Result<Self, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }

    /// Stack layout for the given orientation with this policy's tuning.
    #[must_use]
    pub fn layout_for(&self, orientation: pagestack_core::Orientation) -> StackLayout {
        StackLayout::horizontal()
            .orientation(orientation)
            .tuning(self.layout)
            .mobile(self.mobile)
    }

    /// Format as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"pagestack-policy-v1","max_open_visible":{},"max_closed_visible":{},"stack_increment":{},"peek_height":{},"close_px":{},"open_px":{},"breakpoint_px":{}}}"#,
            self.layout.max_open_visible,
            self.layout.max_closed_visible,
            self.layout.stack_increment,
            self.mobile.peek_height,
            self.gesture.close_px,
            self.gesture.open_px,
            self.breakpoint_px,
        )
    }
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// Tween parameters the renderer uses when committing new targets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionPolicy {
    /// Tween duration in milliseconds. Default: 1000.
    pub duration_ms: u64,
    /// Cubic bezier control points `[x1, y1, x2, y2]`. Default: `[0.19, 1, 0.22, 1]`.
    pub easing: [f64; 4],
    /// Delay for the card two below the active one on mobile. Default: 300.
    pub mobile_follow_delay_ms: u64,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: [0.19, 1.0, 0.22, 1.0],
            mobile_follow_delay_ms: 300,
        }
    }
}

impl MotionPolicy {
    /// Tween duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Follow delay for the card entering behind a mobile sheet.
    #[must_use]
    pub const fn mobile_follow_delay(&self) -> Duration {
        Duration::from_millis(self.mobile_follow_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a stack policy.
#[derive(Debug)]
pub enum PolicyConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PolicyConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PolicyConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
