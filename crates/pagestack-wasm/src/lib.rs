#![forbid(unsafe_code)]

//! WASM bindings for PageStack.
//!
//! This crate exposes [`StackRunner`], a `wasm-bindgen` class that owns a
//! stack controller and a pointer tracker, plus the two stateless solvers
//! `computeStackPositions` and `computeStackPeekOffsets`. The host reports
//! inputs and reads positions back after each one.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{StackRunner, compute_stack_peek_offsets, compute_stack_positions};

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;
