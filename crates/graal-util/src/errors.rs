use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for every stage of toolchain provisioning and compilation.
#[derive(Debug, Error, Diagnostic)]
pub enum GraalError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Host OS or CPU is outside the GraalVM distribution matrix.
    #[error("No GraalVM support for {platform}")]
    #[diagnostic(help("GraalVM CE is distributed for macOS, Linux and Windows on amd64 only"))]
    UnsupportedPlatform { platform: String },

    /// Forbidden option, unsupported version combination or a missing setting.
    #[error("Invalid configuration: {message}")]
    #[diagnostic(help("Check the [graal] section of your graal.toml"))]
    InvalidConfiguration { message: String },

    /// Archive could not be fetched.
    #[error("Failed to download {url}: {message}")]
    #[diagnostic(help(
        "A 404 usually means the graal-version/java-version combination was never published"
    ))]
    DownloadFailed { url: String, message: String },

    /// The unpacker exited non-zero or the archive could not be read.
    #[error("Extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        code: Option<i32>,
    },

    /// The unpacked distribution is missing a required binary. `code` is set
    /// when the `gu` repair ran and failed.
    #[error("Toolchain corrupt: {message}")]
    #[diagnostic(help("Remove the toolchain directory from the cache and run again"))]
    ToolchainCorrupt {
        message: String,
        code: Option<i32>,
    },

    /// `native-image` exited with a non-zero status.
    #[error("Compilation failed: {message}")]
    CompilationFailed { message: String, code: i32 },

    /// No Visual Studio `vcvars64.bat` or Windows SDK `SetEnv.cmd` was found.
    #[error("No suitable Windows SDK/VS installation: {message}")]
    #[diagnostic(help("Install Visual Studio Build Tools or set graal.windows.vs-vars-path"))]
    WindowsEnvUnavailable { message: String },

    /// A child process was terminated before reporting an exit code.
    #[error("Interrupted: {message}")]
    Interrupted { message: String },
}

impl GraalError {
    /// Process exit status to report for this error.
    ///
    /// Child exit codes are surfaced unchanged, a killed child maps to `130`
    /// and every other class maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CompilationFailed { code, .. } => *code,
            Self::ExtractionFailed {
                code: Some(code), ..
            }
            | Self::ToolchainCorrupt {
                code: Some(code), ..
            } => *code,
            Self::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type GraalResult<T> = miette::Result<T>;
