//! Operation: compile a native executable or shared library.

use std::path::PathBuf;

use graal_compiler::{driver, launcher, ArtifactKind, Invocation};
use graal_toolchain::ToolchainHandle;

use crate::context::ProjectContext;

pub fn build_executable(ctx: &ProjectContext, handle: &ToolchainHandle) -> miette::Result<PathBuf> {
    build(ctx, handle, ArtifactKind::Executable)
}

pub fn build_shared_library(
    ctx: &ProjectContext,
    handle: &ToolchainHandle,
) -> miette::Result<PathBuf> {
    build(ctx, handle, ArtifactKind::SharedLibrary)
}

fn build(
    ctx: &ProjectContext,
    handle: &ToolchainHandle,
    kind: ArtifactKind,
) -> miette::Result<PathBuf> {
    let invocation = Invocation::build(kind, &ctx.config, ctx.platform, &ctx.build_dir)?;
    let launcher = launcher::launcher_for(
        ctx.platform,
        ctx.config.windows(),
        ctx.config.java_version()?,
        &ctx.vs_locator,
    )?;
    driver::compile(&invocation, &handle.native_image, launcher.as_ref())
}
