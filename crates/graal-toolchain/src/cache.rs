//! On-disk cache layout shared by the downloader, extractor and compiler driver.
//!
//! ```text
//! <root>/<graal-version>/<java-version>/<archive file>
//! <root>/<graal-version>/<java-version>/<distribution dir>/bin/native-image
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use graal_core::config::{self, GraalConfig};
use graal_core::platform::Platform;
use graal_core::version::JavaVersion;

use crate::naming::Distribution;

/// Root of the toolchain cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Honour `com.palantir.graal.cache.dir` from the host properties.
    pub fn from_properties(properties: &BTreeMap<String, String>) -> Self {
        Self::new(config::cache_root(properties))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<graal-version>/<java-version>`
    pub fn version_dir(&self, graal_version: &str, java_version: JavaVersion) -> PathBuf {
        self.root
            .join(graal_version)
            .join(java_version.major().to_string())
    }
}

/// Every location one distribution occupies, derived once from the
/// configuration and threaded through download, extraction and compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub distribution: Distribution,
    pub archive_url: String,
    pub version_dir: PathBuf,
    pub archive: PathBuf,
    pub tree_root: PathBuf,
    pub native_image: PathBuf,
    pub gu: PathBuf,
}

impl ResolvedPaths {
    /// Compute the paths without touching the filesystem or the network.
    pub fn resolve(
        config: &GraalConfig,
        platform: Platform,
        layout: &CacheLayout,
    ) -> miette::Result<Self> {
        let distribution = Distribution::from_config(config, platform)?;
        let archive_url = distribution.archive_url(&config.download_base_url()?)?;
        Self::for_distribution(distribution, archive_url, layout)
    }

    pub fn for_distribution(
        distribution: Distribution,
        archive_url: String,
        layout: &CacheLayout,
    ) -> miette::Result<Self> {
        let version_dir =
            layout.version_dir(distribution.graal_version(), distribution.java_version());
        let archive = version_dir.join(distribution.archive_file_name()?);
        let tree_root = version_dir.join(distribution.directory_name());
        let native_image = tree_root.join(distribution.binary_rel_path("native-image")?);
        let gu = tree_root.join(distribution.binary_rel_path("gu")?);
        Ok(Self {
            distribution,
            archive_url,
            version_dir,
            archive,
            tree_root,
            native_image,
            gu,
        })
    }
}
