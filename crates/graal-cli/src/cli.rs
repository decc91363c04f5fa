//! CLI argument definitions for `graal`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "graal",
    version,
    about = "Provision GraalVM and compile JVM applications with native-image",
    long_about = "Downloads and caches GraalVM CE distributions, installs the native-image \
                  component, and compiles a jar into a native executable or shared library. \
                  Settings come from graal.toml in the current directory or an ancestor; \
                  flags override them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Overrides for values in `graal.toml`.
#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    /// GraalVM version, e.g. 22.1.0
    #[arg(long, global = true)]
    pub graal_version: Option<String>,

    /// Java version of the distribution: 8, 11 or 16
    #[arg(long, global = true)]
    pub java_version: Option<String>,

    /// Base URL to download distributions from
    #[arg(long, global = true)]
    pub download_base_url: Option<String>,

    /// Entry point class for executables
    #[arg(long, global = true)]
    pub main_class: Option<String>,

    /// Name of the produced executable or library, without extension
    #[arg(long, global = true)]
    pub output_name: Option<String>,

    /// Application jar
    #[arg(long, global = true)]
    pub jar: Option<PathBuf>,

    /// Extra classpath entry (repeatable)
    #[arg(long = "classpath", global = true)]
    pub classpath: Vec<PathBuf>,

    /// Extra native-image option (repeatable)
    #[arg(long = "option", global = true, allow_hyphen_values = true)]
    pub options: Vec<String>,

    /// Build directory; artifacts go to <build-dir>/graal
    #[arg(long, global = true)]
    pub build_dir: Option<PathBuf>,

    /// Host property, e.g. -P com.palantir.graal.cache.dir=/tmp/graal
    #[arg(short = 'P', value_name = "KEY=VALUE", value_parser = parse_property, global = true)]
    pub properties: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the GraalVM archive into the cache
    Download,

    /// Download and unpack GraalVM, installing native-image if needed
    Extract,

    /// Compile the jar into a native executable
    NativeImage,

    /// Compile the jar into a native shared library
    SharedLibrary,

    /// Write reflectconfig.json for the configured reflection classes
    ReflectConfig,

    /// Show the download URL and cache locations without downloading
    Paths,
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
