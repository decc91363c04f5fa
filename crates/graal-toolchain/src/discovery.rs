//! Provision a GraalVM toolchain and hand out a validated handle to it.

use std::path::PathBuf;

use graal_util::errors::GraalError;

use crate::cache::ResolvedPaths;
use crate::naming::Distribution;
use crate::{download, install};

/// A provisioned, validated GraalVM installation in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainHandle {
    pub distribution: Distribution,
    pub home: PathBuf,
    pub native_image: PathBuf,
    pub gu: PathBuf,
}

impl ToolchainHandle {
    /// Open an already-extracted tree. Fails with `ToolchainCorrupt` if it
    /// has no `native-image`.
    pub fn open(paths: &ResolvedPaths) -> miette::Result<Self> {
        if !paths.tree_root.is_dir() {
            return Err(GraalError::ToolchainCorrupt {
                message: format!(
                    "GraalVM {} is not extracted at {}",
                    paths.distribution.graal_version(),
                    paths.tree_root.display()
                ),
                code: None,
            }
            .into());
        }
        if !paths.native_image.is_file() {
            return Err(GraalError::ToolchainCorrupt {
                message: format!("native-image missing at {}", paths.native_image.display()),
                code: None,
            }
            .into());
        }
        Ok(Self {
            distribution: paths.distribution.clone(),
            home: paths.tree_root.clone(),
            native_image: paths.native_image.clone(),
            gu: paths.gu.clone(),
        })
    }
}

/// Download, extract and validate. Each stage is skipped when its output is
/// already in the cache, so a second call touches neither network nor `tar`.
pub fn provision_toolchain(paths: &ResolvedPaths) -> miette::Result<ToolchainHandle> {
    if !paths.tree_root.is_dir() {
        download::download_archive(paths)?;
    }
    install::extract_toolchain(paths)?;
    let handle = ToolchainHandle::open(paths)?;
    tracing::info!(
        "GraalVM {} ready at {}",
        handle.distribution.graal_version(),
        handle.home.display()
    );
    Ok(handle)
}
