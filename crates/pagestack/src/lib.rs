#![forbid(unsafe_code)]

//! PageStack public facade crate.
//!
//! Re-exports the solver, controller and gesture types from the internal
//! crates and offers a prelude for day-to-day usage.
//!
//! ```
//! use pagestack::prelude::*;
//!
//! let mut stack = StackController::default()
//!     .with_card_count(2)
//!     .with_container(390.0, 844.0);
//! stack.handle(StackInput::DragEnd { index: 0, offset: DragOffset::new(0.0, -200.0) });
//! assert_eq!(stack.active_index(), 0);
//! ```

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use pagestack_core::{
    ContainerSize, DragOffset, DragOutcome, DragRole, DragThresholds, DragTracker, Orientation,
    StackInput, ViewportMetrics, classify_drag,
};

// --- Layout re-exports -----------------------------------------------------

pub use pagestack_layout::{
    MobileTuning, StackLayout, StackSolution, StackTuning, compute_stack_peek_offsets,
    compute_stack_positions,
};

// --- Runtime re-exports ----------------------------------------------------

pub use pagestack_runtime::{
    CardFrame, CardSpec, IgnoreReason, MotionPolicy, PolicyConfigError, StackController,
    StackFrame, StackPolicy, StackState, Transition,
};

pub use error::{Error, Result};

#[cfg(feature = "policy-config")]
pub use error::load_policy;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CardSpec, DragOffset, Error, Orientation, Result, StackController, StackFrame, StackInput,
        StackPolicy, StackState, Transition,
    };

    pub use crate::{core, layout, runtime};
}

pub use pagestack_core as core;
pub use pagestack_layout as layout;
pub use pagestack_runtime as runtime;
