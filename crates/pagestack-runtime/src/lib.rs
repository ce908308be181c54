#![forbid(unsafe_code)]

//! Interaction state and policy for PageStack.
//!
//! [`StackController`] owns the stack state and turns [`StackInput`] values
//! into [`Transition`]s; [`StackController::frame`] derives the per-card render
//! targets. [`StackPolicy`] collects every tunable and can be loaded from
//! TOML/JSON with the `policy-config` feature.
//!
//! ```
//! use pagestack_runtime::{StackController, StackInput, StackState};
//!
//! let mut stack = StackController::default()
//!     .with_card_count(3)
//!     .with_container(1000.0, 700.0);
//! stack.handle(StackInput::Click { index: 0 });
//! assert_eq!(stack.state(), StackState::Open(0));
//! assert_eq!(stack.positions(), vec![280.0, 920.0, 970.0]);
//! ```

pub mod controller;
pub mod frame;
pub mod policy_config;
pub mod state;

pub use controller::{CardSpec, StackController};
pub use frame::{CardFrame, StackFrame};
pub use pagestack_core::StackInput;
pub use policy_config::{MotionPolicy, PolicyConfigError, StackPolicy};
pub use state::{IgnoreReason, StackState, Transition};
