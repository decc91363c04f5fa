use std::path::PathBuf;

use miette::Result;

use graal_ops::{ops_build, ops_provision, ProjectContext};
use graal_toolchain::ToolchainHandle;

pub fn exec_native_image(ctx: &ProjectContext) -> Result<()> {
    run(ctx, ops_build::build_executable)
}

pub fn exec_shared_library(ctx: &ProjectContext) -> Result<()> {
    run(ctx, ops_build::build_shared_library)
}

fn run(
    ctx: &ProjectContext,
    build: fn(&ProjectContext, &ToolchainHandle) -> Result<PathBuf>,
) -> Result<()> {
    let handle = ops_provision::provision_toolchain(ctx)?;
    let artifact = build(ctx, &handle)?;
    println!("{}", artifact.display());
    Ok(())
}
