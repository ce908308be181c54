#![forbid(unsafe_code)]

//! Replay, storm and fixture tooling for PageStack.
//!
//! The `pagestack-harness` binary is a thin shell over [`cli::run_from_env`];
//! the modules here are usable from integration tests directly.

pub mod cli;
pub mod determinism;
pub mod error;
pub mod input_storm;
pub mod replay;
pub mod script;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
