//! Locate the batch file that sets up an MSVC build environment on Windows.
//!
//! `native-image` needs `cl.exe`, the Windows SDK headers and libraries on
//! its environment. Rather than synthesising `PATH`, `LIB`, `INCLUDE` and
//! friends, we find Visual Studio's `vcvars64.bat` (or the Windows 7.1 SDK's
//! `SetEnv.cmd` for Java 8) and let the launcher `call` it.

use std::path::{Path, PathBuf};

use graal_core::config::WindowsHints;
use graal_core::version::JavaVersion;
use graal_util::errors::GraalError;

pub const DEFAULT_VS_ROOT: &str = r"C:\Program Files (x86)\Microsoft Visual Studio";
pub const WINDOWS_7_ENV_PATH: &str = r"C:\Program Files\Microsoft SDKs\Windows\v7.1\Bin\SetEnv.cmd";

/// Newest first.
pub const SUPPORTED_VS_VERSIONS: [&str; 2] = ["2019", "2017"];
/// Most capable first.
pub const SUPPORTED_VS_EDITIONS: [&str; 3] = ["Enterprise", "Professional", "Community"];

/// Search roots for MSVC environment scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsLocator {
    vs_root: PathBuf,
    legacy_setenv: PathBuf,
}

impl Default for VsLocator {
    fn default() -> Self {
        Self::new(DEFAULT_VS_ROOT, WINDOWS_7_ENV_PATH)
    }
}

impl VsLocator {
    pub fn new(vs_root: impl Into<PathBuf>, legacy_setenv: impl Into<PathBuf>) -> Self {
        Self {
            vs_root: vs_root.into(),
            legacy_setenv: legacy_setenv.into(),
        }
    }

    /// `<root>\<version>\<edition>\VC\Auxiliary\Build\vcvars64.bat`
    pub fn vcvars_path(&self, version: &str, edition: &str) -> PathBuf {
        self.vs_root
            .join(version)
            .join(edition)
            .join("VC")
            .join("Auxiliary")
            .join("Build")
            .join("vcvars64.bat")
    }

    /// First existing candidate wins: the user's path, then Visual Studio
    /// (Java 11+), then the Windows 7.1 SDK (Java 8).
    pub fn resolve(&self, hints: &WindowsHints, java: JavaVersion) -> miette::Result<PathBuf> {
        if let Some(user) = hints.vs_vars_path.as_deref().filter(|p| !p.trim().is_empty()) {
            let user = PathBuf::from(user);
            if user.is_file() {
                tracing::debug!("using configured MSVC environment {}", user.display());
                return Ok(user);
            }
            tracing::warn!(
                "configured vs-vars-path {} does not exist, searching default locations",
                user.display()
            );
        }

        let mut tried = Vec::new();
        if java >= JavaVersion::Java11 {
            let version = hints
                .vs_version
                .clone()
                .or_else(|| first_present(&self.vs_root, &SUPPORTED_VS_VERSIONS));
            if let Some(version) = version {
                let edition = hints
                    .vs_edition
                    .clone()
                    .or_else(|| first_present(&self.vs_root.join(&version), &SUPPORTED_VS_EDITIONS));
                if let Some(edition) = edition {
                    let vcvars = self.vcvars_path(&version, &edition);
                    if vcvars.is_file() {
                        return Ok(vcvars);
                    }
                    tried.push(vcvars);
                }
            }
            if tried.is_empty() {
                tried.push(self.vs_root.clone());
            }
        } else {
            if self.legacy_setenv.is_file() {
                return Ok(self.legacy_setenv.clone());
            }
            tried.push(self.legacy_setenv.clone());
        }

        let tried: Vec<String> = tried.iter().map(|p| p.display().to_string()).collect();
        Err(GraalError::WindowsEnvUnavailable {
            message: format!("searched {} for Java {java}", tried.join(", ")),
        }
        .into())
    }
}

fn first_present(dir: &Path, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|name| dir.join(name).is_dir())
        .map(|name| name.to_string())
}
