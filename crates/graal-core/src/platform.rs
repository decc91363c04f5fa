//! Host platform probe: operating system and CPU family.

use std::fmt;

use graal_util::errors::GraalError;

/// Host operating system families GraalVM CE is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Mac,
    Linux,
    Windows,
    Unknown,
}

/// Host CPU families GraalVM CE is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Amd64,
    Unknown,
}

impl OperatingSystem {
    /// Classify an OS name as reported by `std::env::consts::OS`.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("mac") || name == "darwin" {
            Self::Mac
        } else if name.contains("linux") {
            Self::Linux
        } else if name.contains("win") {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }
}

impl Architecture {
    /// Classify a CPU name as reported by `std::env::consts::ARCH`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "x86_64" | "amd64" | "x64" => Self::Amd64,
            _ => Self::Unknown,
        }
    }

    pub fn current() -> Self {
        Self::from_name(std::env::consts::ARCH)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mac => write!(f, "MAC"),
            Self::Linux => write!(f, "LINUX"),
            Self::Windows => write!(f, "WINDOWS"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amd64 => write!(f, "AMD64"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An (OS, arch) pair. All platform-dependent naming is a function of this value,
/// so callers pass it explicitly instead of probing the host at each use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: OperatingSystem,
    pub arch: Architecture,
}

impl Platform {
    pub const fn new(os: OperatingSystem, arch: Architecture) -> Self {
        Self { os, arch }
    }

    /// Probe the host this process runs on.
    pub fn current() -> Self {
        Self::new(OperatingSystem::current(), Architecture::current())
    }

    pub const fn linux_amd64() -> Self {
        Self::new(OperatingSystem::Linux, Architecture::Amd64)
    }

    pub const fn mac_amd64() -> Self {
        Self::new(OperatingSystem::Mac, Architecture::Amd64)
    }

    pub const fn windows_amd64() -> Self {
        Self::new(OperatingSystem::Windows, Architecture::Amd64)
    }

    /// The OS, or `UnsupportedPlatform` if it is unknown.
    pub fn supported_os(&self) -> Result<OperatingSystem, GraalError> {
        match self.os {
            OperatingSystem::Unknown => Err(GraalError::UnsupportedPlatform {
                platform: self.os.to_string(),
            }),
            os => Ok(os),
        }
    }

    /// The architecture, or `UnsupportedPlatform` if it is unknown.
    pub fn supported_arch(&self) -> Result<Architecture, GraalError> {
        match self.arch {
            Architecture::Unknown => Err(GraalError::UnsupportedPlatform {
                platform: self.arch.to_string(),
            }),
            arch => Ok(arch),
        }
    }

    /// Fail unless both OS and architecture are known.
    pub fn require_supported(&self) -> Result<(), GraalError> {
        self.supported_os()?;
        self.supported_arch()?;
        Ok(())
    }

    pub fn is_windows(&self) -> bool {
        self.os == OperatingSystem::Windows
    }

    /// Separator for joining classpath entries: `:` on mac/linux, `;` on Windows.
    pub fn path_separator(&self) -> Result<&'static str, GraalError> {
        match self.supported_os()? {
            OperatingSystem::Windows => Ok(";"),
            _ => Ok(":"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
