//! GraalVM version predicates and Java version tags.
//!
//! GraalVM version strings come in three shapes: releases (`22.1.0`), the
//! 1.0 release candidates (`1.0.0-rc12`) and dev snapshots
//! (`22.1.0-dev-20220314_2252`). They are kept as raw strings; these
//! predicates classify them.

use std::fmt;
use std::str::FromStr;

use graal_util::errors::GraalError;

/// `true` if `version`'s first two dot-separated numeric tokens are
/// `>= major.minor`. Anything that does not start with two numbers is `false`.
pub fn is_at_least(version: &str, major: u32, minor: u32) -> bool {
    let mut parts = version.split('.');
    let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
        return false;
    };
    match (first.parse::<u32>(), second.parse::<u32>()) {
        (Ok(v_major), Ok(v_minor)) => v_major > major || (v_major == major && v_minor >= minor),
        _ => false,
    }
}

/// `true` for the 1.0 release candidates (`1.0.0-rc*`).
pub fn is_rc(version: &str) -> bool {
    version.starts_with("1.0.0-rc")
}

/// `true` for dev snapshots (`*-dev-*`).
pub fn is_dev(version: &str) -> bool {
    version.contains("-dev-")
}

/// Strip the snapshot stamp: `22.1.0-dev-20220314_2252` -> `22.1.0-dev`.
///
/// Versions without `-dev` are returned unchanged.
pub fn cut_dev_suffix(version: &str) -> &str {
    match version.find("-dev") {
        Some(idx) => &version[..idx + "-dev".len()],
        None => version,
    }
}

/// Distribution-naming era, which decides archive URL layout and directory naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// `1.0.0-rc*`: tar.gz only, no java tag, `macos` on mac.
    ReleaseCandidate,
    /// Releases before 19.3: no java tag, `macos` on mac.
    Legacy,
    /// Releases from 19.3 on: java-tagged names, `darwin` on mac.
    Modern,
    /// Dev snapshots from the dev-builds repository.
    Dev,
}

impl Era {
    pub fn of(version: &str) -> Self {
        if is_rc(version) {
            Self::ReleaseCandidate
        } else if is_dev(version) {
            Self::Dev
        } else if is_at_least(version, 19, 3) {
            Self::Modern
        } else {
            Self::Legacy
        }
    }

    /// Whether archive and directory names carry a `java<j>` tag.
    pub fn has_java_tag(self) -> bool {
        matches!(self, Self::Modern | Self::Dev)
    }
}

/// Java language level a GraalVM distribution is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaVersion {
    Java8,
    Java11,
    Java16,
}

impl JavaVersion {
    pub const SUPPORTED: [&'static str; 3] = ["16", "11", "8"];

    pub fn major(self) -> u32 {
        match self {
            Self::Java8 => 8,
            Self::Java11 => 11,
            Self::Java16 => 16,
        }
    }

    /// The `java<j>` tag used in modern distribution names.
    pub fn tag(self) -> String {
        format!("java{}", self.major())
    }

    /// Check invariant (i): Java 16 needs Graal >= 21.1.0, any Java above 8
    /// needs Graal >= 19.3.
    pub fn check_compatible(self, graal_version: &str) -> Result<(), GraalError> {
        if self == Self::Java16 && !is_at_least(graal_version, 21, 1) {
            return Err(GraalError::InvalidConfiguration {
                message: format!(
                    "Unsupported GraalVM version {graal_version} for Java 16, needs >= 21.1.0."
                ),
            });
        }
        if self > Self::Java8 && !is_at_least(graal_version, 19, 3) {
            return Err(GraalError::InvalidConfiguration {
                message: format!(
                    "Unsupported Java version {self} for GraalVM version {graal_version}, needs >= 19.3.0."
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major())
    }
}

impl FromStr for JavaVersion {
    type Err = GraalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "8" => Ok(Self::Java8),
            "11" => Ok(Self::Java11),
            "16" => Ok(Self::Java16),
            other => Err(GraalError::InvalidConfiguration {
                message: format!(
                    "Java version {other} is not supported. Supported versions are: {:?}",
                    Self::SUPPORTED
                ),
            }),
        }
    }
}
