//! Typed view of user-supplied GraalVM settings with defaults and read-time validation.
//!
//! Setters store raw values; accessors validate. A bad `java-version` or a
//! forbidden option therefore only fails the flows that actually read it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use graal_util::errors::GraalError;

use crate::options::{NativeImageOption, NativeImageOptions};
use crate::version::{self, Era, JavaVersion};

pub const DEFAULT_GRAAL_VERSION: &str = "20.2.0";
pub const DEFAULT_JAVA_VERSION: &str = "8";

pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://github.com/oracle/graal/releases/download/";
pub const DOWNLOAD_BASE_URL_GRAAL_19_3: &str =
    "https://github.com/graalvm/graalvm-ce-builds/releases/download/";
pub const DOWNLOAD_BASE_URL_DEV: &str =
    "https://github.com/graalvm/graalvm-ce-dev-builds/releases/download/";

/// Host property that relocates the toolchain cache.
pub const CACHE_DIR_PROPERTY: &str = "com.palantir.graal.cache.dir";

/// Project configuration file name.
pub const MANIFEST_FILE: &str = "graal.toml";

/// `graal.toml` as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraalManifest {
    #[serde(default)]
    pub graal: GraalSection,

    /// Host properties such as `com.palantir.graal.cache.dir`.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// The `[graal]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GraalSection {
    #[serde(default)]
    pub graal_version: Option<String>,
    #[serde(default)]
    pub java_version: Option<String>,
    #[serde(default)]
    pub download_base_url: Option<String>,
    #[serde(default)]
    pub main_class: Option<String>,
    #[serde(default)]
    pub output_name: Option<String>,
    #[serde(default)]
    pub jar: Option<PathBuf>,
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    #[serde(default)]
    pub options: Vec<RawOption>,
    #[serde(default)]
    pub reflection_classes: Vec<String>,
    #[serde(default)]
    pub build_dir: Option<PathBuf>,
    #[serde(default)]
    pub windows: WindowsHints,
}

/// An option as written in `graal.toml`: a plain string or `{ env = "NAME" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOption {
    Literal(String),
    Env { env: String },
}

impl From<RawOption> for NativeImageOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Literal(s) => NativeImageOption::Literal(s),
            RawOption::Env { env } => NativeImageOption::from_env(env),
        }
    }
}

/// Windows-only hints for locating the MSVC build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WindowsHints {
    #[serde(default)]
    pub vs_version: Option<String>,
    #[serde(default)]
    pub vs_edition: Option<String>,
    #[serde(default)]
    pub vs_vars_path: Option<String>,
}

impl GraalManifest {
    /// Parse a `graal.toml` file.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraalError::InvalidConfiguration {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            GraalError::InvalidConfiguration {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse(content: &str) -> Result<Self, GraalError> {
        toml::from_str(content).map_err(|e| GraalError::InvalidConfiguration {
            message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
        })
    }
}

/// Resolve the cache root: the `com.palantir.graal.cache.dir` property if
/// set, else `<home>/.gradle/caches/com.palantir.graal`.
pub fn cache_root(properties: &BTreeMap<String, String>) -> PathBuf {
    match properties.get(CACHE_DIR_PROPERTY) {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => default_cache_root(),
    }
}

pub fn default_cache_root() -> PathBuf {
    graal_util::fs::home_dir()
        .join(".gradle")
        .join("caches")
        .join("com.palantir.graal")
}

/// Immutable-after-resolution GraalVM settings for one invocation.
#[derive(Debug, Clone)]
pub struct GraalConfig {
    graal_version: String,
    java_version: String,
    download_base_url: Option<String>,
    main_class: Option<String>,
    output_name: Option<String>,
    options: NativeImageOptions,
    jar_file: Option<PathBuf>,
    classpath: Vec<PathBuf>,
    reflection_classes: Vec<String>,
    windows: WindowsHints,
}

impl Default for GraalConfig {
    fn default() -> Self {
        Self {
            graal_version: DEFAULT_GRAAL_VERSION.to_string(),
            java_version: DEFAULT_JAVA_VERSION.to_string(),
            download_base_url: None,
            main_class: None,
            output_name: None,
            options: NativeImageOptions::new(),
            jar_file: None,
            classpath: Vec::new(),
            reflection_classes: Vec::new(),
            windows: WindowsHints::default(),
        }
    }
}

impl GraalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a parsed manifest, resolving relative
    /// paths against `base_dir` (the directory holding `graal.toml`).
    ///
    /// Options go in unchecked so that a forbidden one is reported when the
    /// option list is read, not when the file is loaded.
    pub fn from_manifest(section: GraalSection, base_dir: &Path) -> Self {
        let mut config = Self::default();
        if let Some(v) = section.graal_version {
            config.graal_version = v;
        }
        if let Some(j) = section.java_version {
            config.java_version = j;
        }
        config.download_base_url = section.download_base_url;
        config.main_class = section.main_class;
        config.output_name = section.output_name;
        config.jar_file = section
            .jar
            .map(|jar| graal_util::fs::absolutize(base_dir, &jar));
        for entry in section.classpath {
            config
                .classpath
                .push(graal_util::fs::absolutize(base_dir, &entry));
        }
        config.extend_options(section.options);
        config.reflection_classes = section.reflection_classes;
        config.windows = section.windows;
        config
    }

    // -- setters -----------------------------------------------------------

    pub fn set_graal_version(&mut self, value: impl Into<String>) -> &mut Self {
        self.graal_version = value.into();
        self
    }

    pub fn set_java_version(&mut self, value: impl Into<String>) -> &mut Self {
        self.java_version = value.into();
        self
    }

    pub fn set_download_base_url(&mut self, value: impl Into<String>) -> &mut Self {
        self.download_base_url = Some(value.into());
        self
    }

    pub fn set_main_class(&mut self, value: impl Into<String>) -> &mut Self {
        self.main_class = Some(value.into());
        self
    }

    pub fn set_output_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.output_name = Some(value.into());
        self
    }

    pub fn set_jar_file(&mut self, value: impl Into<PathBuf>) -> &mut Self {
        self.jar_file = Some(value.into());
        self
    }

    pub fn add_classpath_entry(&mut self, value: impl Into<PathBuf>) -> &mut Self {
        self.classpath.push(value.into());
        self
    }

    pub fn add_reflection_class(&mut self, value: impl Into<String>) -> &mut Self {
        self.reflection_classes.push(value.into());
        self
    }

    /// Add a `native-image` option. A literal `-H:Name=` is rejected; use
    /// [`set_output_name`](Self::set_output_name) instead.
    pub fn add_option(&mut self, value: impl Into<NativeImageOption>) -> miette::Result<&mut Self> {
        self.options.push(value)?;
        Ok(self)
    }

    /// Add several options, stopping at the first forbidden one.
    pub fn add_options<I, O>(&mut self, values: I) -> miette::Result<&mut Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<NativeImageOption>,
    {
        for value in values {
            self.options.push(value)?;
        }
        Ok(self)
    }

    /// Append options gathered from outside the build script (manifest,
    /// command line). Nothing is checked until [`options`](Self::options)
    /// is read.
    pub fn extend_options<I, O>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = O>,
        O: Into<NativeImageOption>,
    {
        for value in values {
            self.options.push_unchecked(value.into());
        }
        self
    }

    pub fn set_windows_vs_version(&mut self, value: impl Into<String>) -> &mut Self {
        self.windows.vs_version = Some(value.into());
        self
    }

    pub fn set_windows_vs_edition(&mut self, value: impl Into<String>) -> &mut Self {
        self.windows.vs_edition = Some(value.into());
        self
    }

    pub fn set_windows_vs_vars_path(&mut self, value: impl Into<String>) -> &mut Self {
        self.windows.vs_vars_path = Some(value.into());
        self
    }

    // -- read-time accessors -----------------------------------------------

    pub fn graal_version(&self) -> &str {
        &self.graal_version
    }

    pub fn era(&self) -> Era {
        Era::of(&self.graal_version)
    }

    /// The Java version, validated against the supported set and the Graal version.
    pub fn java_version(&self) -> miette::Result<JavaVersion> {
        let java: JavaVersion = self.java_version.parse()?;
        java.check_compatible(&self.graal_version)?;
        Ok(java)
    }

    /// The configured base URL, or the era default.
    pub fn download_base_url(&self) -> miette::Result<String> {
        self.java_version()?;
        if let Some(url) = &self.download_base_url {
            return Ok(url.clone());
        }
        let default = match self.era() {
            Era::Dev => DOWNLOAD_BASE_URL_DEV,
            Era::Modern => DOWNLOAD_BASE_URL_GRAAL_19_3,
            Era::ReleaseCandidate | Era::Legacy => DEFAULT_DOWNLOAD_BASE_URL,
        };
        Ok(default.to_string())
    }

    /// Entry point class; required for the executable flow.
    pub fn main_class(&self) -> miette::Result<&str> {
        self.main_class
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                GraalError::InvalidConfiguration {
                    message: "nativeImage requires graal.main-class to be defined.".to_string(),
                }
                .into()
            })
    }

    pub fn output_name(&self) -> miette::Result<&str> {
        self.output_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                GraalError::InvalidConfiguration {
                    message: "graal.output-name must be defined.".to_string(),
                }
                .into()
            })
    }

    pub fn jar_file(&self) -> miette::Result<&Path> {
        self.jar_file.as_deref().ok_or_else(|| {
            GraalError::InvalidConfiguration {
                message: "graal.jar must point at the application jar.".to_string(),
            }
            .into()
        })
    }

    /// Rendered options in insertion order; unset deferred entries are dropped.
    pub fn options(&self) -> miette::Result<Vec<String>> {
        Ok(self.options.render()?)
    }

    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    pub fn reflection_classes(&self) -> &[String] {
        &self.reflection_classes
    }

    pub fn windows(&self) -> &WindowsHints {
        &self.windows
    }

    /// Whether the configured version is a dev snapshot.
    pub fn is_dev(&self) -> bool {
        version::is_dev(&self.graal_version)
    }
}
