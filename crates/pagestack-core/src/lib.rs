#![forbid(unsafe_code)]

//! Core: orientation, viewport metrics, input events, and drag gestures.
//!
//! # Role in PageStack
//! `pagestack-core` is the input layer. It owns the vocabulary shared by the
//! layout engine and the controller: which axis the stack runs along, how big
//! the container is, what the rendering collaborator reports back (clicks,
//! hovers, drags), and how a finished drag is classified.
//!
//! # Primary responsibilities
//! - **Orientation / ViewportMetrics**: stack axis and extents, derived fresh
//!   from the measured container on every layout pass.
//! - **StackInput**: canonical input events consumed by the controller.
//! - **Gesture**: the pure drag classifier and a pointer drag tracker.
//!
//! # How it fits in the system
//! `pagestack-layout` consumes the geometry types; `pagestack-runtime`
//! consumes [`event::StackInput`] values and drives the stack state machine.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

pub use event::StackInput;
pub use geometry::{ContainerSize, DragOffset, Orientation, ViewportMetrics};
pub use gesture::{DragOutcome, DragRole, DragThresholds, DragTracker, classify_drag};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, trace_span, warn};
