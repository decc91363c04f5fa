//! GraalVM toolchain management.
//!
//! Composes distribution URLs and cache paths, downloads and unpacks the
//! archive (installing `native-image` through `gu` when the base
//! distribution lacks it) and locates the MSVC environment on Windows.

pub mod cache;
pub mod discovery;
pub mod download;
pub mod install;
pub mod msvc;
pub mod naming;

pub use cache::{CacheLayout, ResolvedPaths};
pub use discovery::{provision_toolchain, ToolchainHandle};
pub use naming::Distribution;
