//! Archive URL, archive file name and directory name for a GraalVM distribution.
//!
//! Everything here is a pure function of (graal version, java version, OS, arch).

use std::path::PathBuf;

use graal_core::config::GraalConfig;
use graal_core::platform::{Architecture, OperatingSystem, Platform};
use graal_core::version::{self, Era, JavaVersion};
use graal_util::errors::GraalError;

const ARTIFACT_PATTERN_RC: &str = "vm-[version]/graalvm-ce-[version]-[os]-[arch].tar.gz";
const ARTIFACT_PATTERN_RELEASE: &str =
    "vm-[version]/graalvm-ce-[javaVersion]-[os]-[arch]-[version].[ext]";
const ARTIFACT_PATTERN_DEV: &str = "[version]/graalvm-ce-[javaVersion]-[os]-[arch]-dev.[ext]";
const FILENAME_PATTERN: &str = "graalvm-ce-[javaVersion]-[version]-[arch].[ext]";

/// Binaries that GraalVM ships as `.cmd` launchers on Windows; all others are `.exe`.
const WINDOWS_CMD_BINARIES: [&str; 4] = ["native-image", "native-image-configure", "polyglot", "gu"];

/// One concrete GraalVM CE distribution for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    graal_version: String,
    java_version: JavaVersion,
    platform: Platform,
}

impl Distribution {
    pub fn new(graal_version: impl Into<String>, java_version: JavaVersion, platform: Platform) -> Self {
        Self {
            graal_version: graal_version.into(),
            java_version,
            platform,
        }
    }

    /// The distribution a configuration asks for on `platform`.
    pub fn from_config(config: &GraalConfig, platform: Platform) -> miette::Result<Self> {
        Ok(Self::new(
            config.graal_version(),
            config.java_version()?,
            platform,
        ))
    }

    pub fn graal_version(&self) -> &str {
        &self.graal_version
    }

    pub fn java_version(&self) -> JavaVersion {
        self.java_version
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn era(&self) -> Era {
        Era::of(&self.graal_version)
    }

    fn os_tag(&self) -> Result<&'static str, GraalError> {
        match self.platform.supported_os()? {
            OperatingSystem::Linux => Ok("linux"),
            OperatingSystem::Mac if self.era().has_java_tag() => Ok("darwin"),
            OperatingSystem::Mac => Ok("macos"),
            OperatingSystem::Windows if self.era() == Era::ReleaseCandidate => {
                Err(GraalError::UnsupportedPlatform {
                    platform: format!("WINDOWS with release candidate {}", self.graal_version),
                })
            }
            OperatingSystem::Windows => Ok("windows"),
            OperatingSystem::Unknown => Err(GraalError::UnsupportedPlatform {
                platform: OperatingSystem::Unknown.to_string(),
            }),
        }
    }

    fn arch_tag(&self) -> Result<&'static str, GraalError> {
        match self.platform.supported_arch()? {
            Architecture::Amd64 => Ok("amd64"),
            Architecture::Unknown => Err(GraalError::UnsupportedPlatform {
                platform: Architecture::Unknown.to_string(),
            }),
        }
    }

    /// `zip` on Windows, `tar.gz` elsewhere (and always for release candidates).
    pub fn archive_extension(&self) -> Result<&'static str, GraalError> {
        let os = self.platform.supported_os()?;
        if os == OperatingSystem::Windows && self.era() != Era::ReleaseCandidate {
            Ok("zip")
        } else {
            Ok("tar.gz")
        }
    }

    fn java_tag(&self) -> String {
        if self.era().has_java_tag() {
            self.java_version.tag()
        } else {
            String::new()
        }
    }

    fn render(&self, pattern: &str) -> Result<String, GraalError> {
        let rendered = pattern
            .replace("[version]", &self.graal_version)
            .replace("[javaVersion]", &self.java_tag())
            .replace("[os]", self.os_tag()?)
            .replace("[arch]", self.arch_tag()?)
            .replace("[ext]", self.archive_extension()?);
        // An empty java tag leaves `graalvm-ce--linux`.
        Ok(rendered.replace("--", "-"))
    }

    /// Full download URL under `base_url`.
    pub fn archive_url(&self, base_url: &str) -> Result<String, GraalError> {
        let pattern = match self.era() {
            Era::ReleaseCandidate => ARTIFACT_PATTERN_RC,
            Era::Dev => ARTIFACT_PATTERN_DEV,
            Era::Legacy | Era::Modern => ARTIFACT_PATTERN_RELEASE,
        };
        Ok(format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.render(pattern)?
        ))
    }

    /// Local file name the archive is cached under.
    pub fn archive_file_name(&self) -> Result<String, GraalError> {
        self.render(FILENAME_PATTERN)
    }

    /// Name of the top-level directory inside the archive.
    pub fn directory_name(&self) -> String {
        match self.era() {
            Era::Dev => format!(
                "graalvm-ce-{}-{}",
                self.java_version.tag(),
                version::cut_dev_suffix(&self.graal_version)
            ),
            Era::Modern => format!(
                "graalvm-ce-{}-{}",
                self.java_version.tag(),
                self.graal_version
            ),
            Era::ReleaseCandidate | Era::Legacy => format!("graalvm-ce-{}", self.graal_version),
        }
    }

    /// Path of `binary` relative to the extracted tree root.
    pub fn binary_rel_path(&self, binary: &str) -> Result<PathBuf, GraalError> {
        match self.platform.supported_os()? {
            OperatingSystem::Mac => Ok(["Contents", "Home", "bin", binary].iter().collect()),
            OperatingSystem::Linux => Ok(["bin", binary].iter().collect()),
            OperatingSystem::Windows => {
                let ext = if WINDOWS_CMD_BINARIES.contains(&binary) {
                    "cmd"
                } else {
                    "exe"
                };
                Ok(PathBuf::from("bin").join(format!("{binary}.{ext}")))
            }
            OperatingSystem::Unknown => Err(GraalError::UnsupportedPlatform {
                platform: OperatingSystem::Unknown.to_string(),
            }),
        }
    }
}
