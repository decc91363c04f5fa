//! Command dispatch and handler modules.

mod build;
mod download;
mod extract;
mod paths;
mod reflect;

use miette::Result;

use graal_ops::{Overrides, ProjectContext};
use graal_util::errors::GraalError;

use crate::cli::{Cli, Command, ProjectArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(GraalError::Io)?;
    tracing::debug!("working directory {}", cwd.display());
    let ctx = ProjectContext::load(&cwd, &overrides(cli.project))?;

    match cli.command {
        Command::Download => download::exec(&ctx),
        Command::Extract => extract::exec(&ctx),
        Command::NativeImage => build::exec_native_image(&ctx),
        Command::SharedLibrary => build::exec_shared_library(&ctx),
        Command::ReflectConfig => reflect::exec(&ctx),
        Command::Paths => paths::exec(&ctx),
    }
}

fn overrides(args: ProjectArgs) -> Overrides {
    Overrides {
        graal_version: args.graal_version,
        java_version: args.java_version,
        download_base_url: args.download_base_url,
        main_class: args.main_class,
        output_name: args.output_name,
        jar: args.jar,
        classpath: args.classpath,
        options: args.options,
        build_dir: args.build_dir,
        properties: args.properties.into_iter().collect(),
    }
}
