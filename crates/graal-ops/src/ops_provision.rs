//! Operation: make the configured GraalVM available in the cache.

use std::path::PathBuf;

use graal_toolchain::{discovery, download, ToolchainHandle};

use crate::context::ProjectContext;

/// Download, extract and validate the toolchain. Idempotent.
pub fn provision_toolchain(ctx: &ProjectContext) -> miette::Result<ToolchainHandle> {
    let paths = ctx.resolved_paths()?;
    discovery::provision_toolchain(&paths)
}

/// Fetch the archive only, returning its path in the cache.
pub fn download_only(ctx: &ProjectContext) -> miette::Result<PathBuf> {
    let paths = ctx.resolved_paths()?;
    if !download::download_archive(&paths)? {
        tracing::info!("{} is up to date", paths.archive.display());
    }
    Ok(paths.archive)
}
