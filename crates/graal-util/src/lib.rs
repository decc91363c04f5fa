//! Shared utilities for graal-native.
//!
//! This crate provides cross-cutting concerns used by all other crates:
//! the unified error type, filesystem helpers, process spawning, and
//! terminal status and progress indicators.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
