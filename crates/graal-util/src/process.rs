use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use crate::errors::GraalError;

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, environment variables, and working directory.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The program this builder launches.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments collected so far.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execute the command and return its captured output.
    pub fn exec(&self) -> Result<Output, GraalError> {
        tracing::debug!("exec: {} {}", self.program, self.args.join(" "));
        self.command().output().map_err(GraalError::from)
    }

    /// Execute the command with inherited stdio and wait for it to exit.
    pub fn status(&self) -> Result<ExitStatus, GraalError> {
        tracing::debug!("run: {} {}", self.program, self.args.join(" "));
        self.command().status().map_err(GraalError::from)
    }
}

/// Classify a finished child: `Ok(None)` on success, `Ok(Some(code))` on a
/// non-zero exit, or [`GraalError::Interrupted`] when the child was killed
/// before reporting a code.
pub fn exit_code_of(program: &str, status: ExitStatus) -> Result<Option<i32>, GraalError> {
    if status.success() {
        return Ok(None);
    }
    match status.code() {
        Some(code) => Ok(Some(code)),
        None => Err(GraalError::Interrupted {
            message: format!("{program} was terminated by a signal"),
        }),
    }
}
