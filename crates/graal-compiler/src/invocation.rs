//! `native-image` argument list for one build.
//!
//! ```text
//! [--shared] -cp <classpath> -H:Path=<build>/graal <options...> -H:Name=<name> [<main class>]
//! ```
//!
//! `-H:Name` goes after the user options so that it overrides any name a
//! macro option set earlier. Building the list is pure; the driver creates
//! the output directory.

use std::fmt;
use std::path::{Path, PathBuf};

use graal_core::config::GraalConfig;
use graal_core::options::NAME_OPTION_PREFIX;
use graal_core::platform::{OperatingSystem, Platform};
use graal_util::errors::GraalError;

use crate::classpath;

/// Directory under the build dir that receives every artifact.
pub const OUTPUT_SUBDIR: &str = "graal";

/// What `native-image` is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Executable,
    SharedLibrary,
}

impl ArtifactKind {
    /// File extension including the dot, or empty.
    pub fn extension(self, platform: Platform) -> Result<&'static str, GraalError> {
        let os = platform.supported_os()?;
        Ok(match (self, os) {
            (Self::Executable, OperatingSystem::Windows) => ".exe",
            (Self::Executable, _) => "",
            (Self::SharedLibrary, OperatingSystem::Mac) => ".dylib",
            (Self::SharedLibrary, OperatingSystem::Windows) => ".dll",
            (Self::SharedLibrary, _) => ".so",
        })
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable => write!(f, "native-image"),
            Self::SharedLibrary => write!(f, "shared library"),
        }
    }
}

/// `<build_dir>/graal`
pub fn output_dir(build_dir: &Path) -> PathBuf {
    build_dir.join(OUTPUT_SUBDIR)
}

/// Everything the argument list is built from, already read out of the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub kind: ArtifactKind,
    pub classpath: Vec<PathBuf>,
    pub jar: PathBuf,
    pub options: Vec<String>,
    pub output_name: String,
    pub main_class: Option<String>,
}

impl BuildRequest {
    /// Read and validate what `kind` needs: output name, jar, options and,
    /// for executables, the main class.
    pub fn from_config(kind: ArtifactKind, config: &GraalConfig) -> miette::Result<Self> {
        let main_class = match kind {
            ArtifactKind::Executable => Some(config.main_class()?.to_string()),
            ArtifactKind::SharedLibrary => None,
        };
        Ok(Self {
            kind,
            classpath: config.classpath().to_vec(),
            jar: config.jar_file()?.to_path_buf(),
            options: config.options()?,
            output_name: config.output_name()?.to_string(),
            main_class,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: ArtifactKind,
    pub output_dir: PathBuf,
    pub output_file: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn build(
        kind: ArtifactKind,
        config: &GraalConfig,
        platform: Platform,
        build_dir: &Path,
    ) -> miette::Result<Self> {
        let request = BuildRequest::from_config(kind, config)?;
        Ok(Self::new(&request, platform, build_dir)?)
    }

    pub fn new(
        request: &BuildRequest,
        platform: Platform,
        build_dir: &Path,
    ) -> Result<Self, GraalError> {
        let kind = request.kind;
        let output_dir = output_dir(build_dir);

        let mut args = Vec::with_capacity(request.options.len() + 6);
        if kind == ArtifactKind::SharedLibrary {
            args.push("--shared".to_string());
        }
        args.push("-cp".to_string());
        args.push(classpath::classpath_arg(
            &request.classpath,
            &request.jar,
            platform,
        )?);
        args.push(format!("-H:Path={}", output_dir.display()));
        args.extend(request.options.iter().cloned());
        args.push(format!("{NAME_OPTION_PREFIX}{}", request.output_name));
        if kind == ArtifactKind::Executable {
            let main_class = request.main_class.as_deref().ok_or_else(|| {
                GraalError::InvalidConfiguration {
                    message: "nativeImage requires graal.main-class to be defined.".to_string(),
                }
            })?;
            args.push(main_class.to_string());
        }

        let output_file = output_dir.join(format!(
            "{}{}",
            request.output_name,
            kind.extension(platform)?
        ));
        Ok(Self {
            kind,
            output_dir,
            output_file,
            args,
        })
    }
}
