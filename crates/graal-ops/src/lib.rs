//! Host entry points.
//!
//! A host (the `graal` CLI, or any other driver) builds a
//! [`ProjectContext`] and calls these in order:
//! [`provision_toolchain`](ops_provision::provision_toolchain), then
//! [`build_executable`](ops_build::build_executable) or
//! [`build_shared_library`](ops_build::build_shared_library).

pub mod context;
pub mod ops_build;
pub mod ops_paths;
pub mod ops_provision;
pub mod ops_reflect;

pub use context::{Overrides, ProjectContext};
