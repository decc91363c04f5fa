//! Operation: write `reflectconfig.json` for the configured classes.

use std::path::PathBuf;

use graal_compiler::reflection;

use crate::context::ProjectContext;

/// `None` when no reflection classes are configured.
pub fn write_reflection_config(ctx: &ProjectContext) -> miette::Result<Option<PathBuf>> {
    reflection::write_reflection_config(ctx.config.reflection_classes(), &ctx.build_dir)
}
