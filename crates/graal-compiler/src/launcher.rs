//! Run `native-image` on the host.
//!
//! On mac and Linux the binary is executed directly. On Windows it needs an
//! MSVC environment, so a temporary `.cmd` script first `call`s
//! `vcvars64.bat` (or `SetEnv.cmd`) and then runs `native-image` in the same
//! `cmd.exe`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use graal_core::config::WindowsHints;
use graal_core::platform::Platform;
use graal_core::version::JavaVersion;
use graal_toolchain::msvc::VsLocator;
use graal_util::errors::GraalError;
use graal_util::process::{self, CommandBuilder};

/// Runs the compiler and maps its exit status.
pub trait Launcher {
    fn launch(&self, native_image: &Path, args: &[String]) -> miette::Result<()>;
}

/// Pick the launcher for `platform`, locating the MSVC environment on Windows.
pub fn launcher_for(
    platform: Platform,
    hints: &WindowsHints,
    java: JavaVersion,
    locator: &VsLocator,
) -> miette::Result<Box<dyn Launcher>> {
    platform.require_supported()?;
    if platform.is_windows() {
        let vcvars = locator.resolve(hints, java)?;
        Ok(Box::new(WindowsLauncher::new(vcvars)))
    } else {
        Ok(Box::new(PosixLauncher))
    }
}

fn check_exit(program: &str, status: ExitStatus) -> miette::Result<()> {
    match process::exit_code_of(program, status)? {
        None => Ok(()),
        Some(code) => Err(GraalError::CompilationFailed {
            message: format!("{program} exited with code {code}"),
            code,
        }
        .into()),
    }
}

/// Executes `native-image` directly with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixLauncher;

impl Launcher for PosixLauncher {
    fn launch(&self, native_image: &Path, args: &[String]) -> miette::Result<()> {
        let status = CommandBuilder::new(native_image.to_string_lossy())
            .args(args.iter().cloned())
            .status()?;
        check_exit("native-image", status)
    }
}

/// Runs `native-image` through `cmd.exe` after sourcing the MSVC environment.
#[derive(Debug, Clone)]
pub struct WindowsLauncher {
    vcvars: PathBuf,
}

impl WindowsLauncher {
    pub fn new(vcvars: impl Into<PathBuf>) -> Self {
        Self {
            vcvars: vcvars.into(),
        }
    }

    pub fn vcvars(&self) -> &Path {
        &self.vcvars
    }
}

/// The `.cmd` script the Windows launcher runs. Lines end in CRLF.
///
/// With `quiet` the environment script's banner goes to `NUL`. Arguments are
/// quoted and escaped so `%` and `!` reach `native-image` unchanged under
/// `cmd.exe /V:ON`.
pub fn render_windows_script(
    vcvars: &Path,
    native_image: &Path,
    args: &[String],
    quiet: bool,
) -> String {
    let redirect = if quiet { " > NUL" } else { "" };
    let mut command = quote_for_cmd(&native_image.display().to_string());
    for arg in args {
        command.push(' ');
        command.push_str(&quote_for_cmd(arg));
    }
    // Delayed expansion strips carets from any line holding a `!`.
    if command.contains('!') {
        command = command.replace('^', "^^").replace('!', "^!");
    }
    format!(
        "@echo off\r\ncall \"{}\"{redirect}\r\n{command}\r\n",
        vcvars.display()
    )
}

fn quote_for_cmd(arg: &str) -> String {
    format!("\"{}\"", arg.replace('%', "%%"))
}

fn cmd_exe(script: &Path) -> Command {
    let mut cmd = Command::new("cmd.exe");
    cmd.args(["/E:ON", "/V:ON", "/c"]);
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.raw_arg(format!("\"{}\"", script.display()));
    }
    #[cfg(not(windows))]
    {
        cmd.arg(script);
    }
    cmd
}

impl Launcher for WindowsLauncher {
    fn launch(&self, native_image: &Path, args: &[String]) -> miette::Result<()> {
        let quiet = !tracing::enabled!(tracing::Level::INFO);
        let script = render_windows_script(&self.vcvars, native_image, args, quiet);

        let mut file = tempfile::Builder::new()
            .prefix("native-image-")
            .suffix(".cmd")
            .tempfile()
            .map_err(GraalError::Io)?;
        file.write_all(script.as_bytes()).map_err(GraalError::Io)?;
        // Closed but still removed on drop.
        let script_path = file.into_temp_path();

        tracing::debug!("run: cmd.exe /E:ON /V:ON /c {}", script_path.display());
        let status = cmd_exe(&script_path).status().map_err(GraalError::Io)?;
        check_exit("native-image", status)
    }
}
