//! `native-image` orchestration.
//!
//! Builds the argument list from a [`GraalConfig`](graal_core::config::GraalConfig),
//! picks a [`Launcher`](launcher::Launcher) for the host and runs the
//! compiler from a provisioned toolchain.

pub mod classpath;
pub mod driver;
pub mod invocation;
pub mod launcher;
pub mod reflection;

pub use invocation::{ArtifactKind, BuildRequest, Invocation};
pub use launcher::{Launcher, PosixLauncher, WindowsLauncher};
