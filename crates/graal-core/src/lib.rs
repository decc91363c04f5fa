//! Core data types for graal-native.
//!
//! This crate defines the configuration facet (`graal.toml` plus its typed,
//! read-time validated view), the host platform probe, GraalVM version
//! predicates, and the ordered `native-image` option list.
//!
//! This crate is intentionally free of network I/O and process spawning.

pub mod config;
pub mod options;
pub mod platform;
pub mod version;
