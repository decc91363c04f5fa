//! Unpack a cached GraalVM archive and make sure `native-image` is installed.
//!
//! The archive is expanded into a hidden staging directory beside the final
//! tree and renamed into place only once `native-image` is present, so an
//! interrupted unpack never leaves a half-populated tree at the final path.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use graal_util::errors::GraalError;
use graal_util::process::{self, CommandBuilder};
use graal_util::progress;

use crate::cache::ResolvedPaths;
use crate::naming::Distribution;

/// Staging directories untouched for this long belong to a crashed run.
pub const STALE_STAGING_AGE: Duration = Duration::from_secs(60 * 60);

fn unpack_failed(path: &Path, e: impl std::fmt::Display) -> GraalError {
    GraalError::ExtractionFailed {
        message: format!("{}: {e}", path.display()),
        code: None,
    }
}

/// Unpack the archive unless the tree root already exists.
///
/// Returns `true` if an extraction happened.
pub fn extract_toolchain(paths: &ResolvedPaths) -> miette::Result<bool> {
    if paths.tree_root.is_dir() {
        tracing::debug!("toolchain already extracted at {}", paths.tree_root.display());
        return Ok(false);
    }
    if !paths.archive.is_file() {
        return Err(GraalError::ExtractionFailed {
            message: format!("archive {} does not exist", paths.archive.display()),
            code: None,
        }
        .into());
    }

    let dir_name = paths.distribution.directory_name();
    progress::status("Extracting", &dir_name);
    graal_util::fs::ensure_dir(&paths.version_dir)
        .map_err(|e| unpack_failed(&paths.version_dir, e))?;
    sweep_stale_staging(&paths.version_dir, &dir_name, STALE_STAGING_AGE);

    let staging = tempfile::Builder::new()
        .prefix(&staging_prefix(&dir_name))
        .tempdir_in(&paths.version_dir)
        .map_err(|e| unpack_failed(&paths.version_dir, e))?;

    if paths.distribution.archive_extension()? == "zip" {
        extract_zip_to(&paths.archive, staging.path())?;
    } else {
        extract_tarball_to(&paths.archive, staging.path())?;
    }

    let staged_root = staging.path().join(&dir_name);
    if !staged_root.is_dir() {
        return Err(GraalError::ExtractionFailed {
            message: format!(
                "{} does not contain a top-level {dir_name} directory",
                paths.archive.display()
            ),
            code: None,
        }
        .into());
    }

    ensure_native_image(&staged_root, &paths.distribution)?;

    if let Err(e) = fs::rename(&staged_root, &paths.tree_root) {
        if paths.tree_root.is_dir() {
            tracing::info!(
                "{} was installed concurrently; using the existing tree",
                paths.tree_root.display()
            );
        } else {
            return Err(unpack_failed(&paths.tree_root, e).into());
        }
    }
    Ok(true)
}

/// Make sure `native-image` exists under `tree_root`, running
/// `gu install native-image` once if it does not.
pub fn ensure_native_image(tree_root: &Path, distribution: &Distribution) -> miette::Result<()> {
    let native_image = tree_root.join(distribution.binary_rel_path("native-image")?);
    if native_image.is_file() {
        return Ok(());
    }

    let gu = tree_root.join(distribution.binary_rel_path("gu")?);
    if !gu.is_file() {
        return Err(GraalError::ToolchainCorrupt {
            message: format!("Failed to find Graal update binary: {}", gu.display()),
            code: None,
        }
        .into());
    }

    progress::status("Installing", "native-image component");
    let program = gu.to_string_lossy().into_owned();
    let status = CommandBuilder::new(program.as_str())
        .args(["install", "native-image"])
        .status()?;
    if let Some(code) = process::exit_code_of(&program, status)? {
        return Err(GraalError::ToolchainCorrupt {
            message: format!("`gu install native-image` exited with code {code}"),
            code: Some(code),
        }
        .into());
    }

    if !native_image.is_file() {
        return Err(GraalError::ToolchainCorrupt {
            message: format!(
                "native-image still missing at {} after `gu install native-image`",
                native_image.display()
            ),
            code: None,
        }
        .into());
    }
    Ok(())
}

fn extract_zip_to(zip_path: &Path, dest: &Path) -> miette::Result<()> {
    let zip_error = |e: zip::result::ZipError| unpack_failed(zip_path, e);

    let file = fs::File::open(zip_path).map_err(|e| unpack_failed(zip_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(zip_error)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_error)?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("skipping unsafe zip entry {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| unpack_failed(&out_path, e))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| unpack_failed(parent, e))?;
        }
        let mut out = fs::File::create(&out_path).map_err(|e| unpack_failed(&out_path, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| unpack_failed(&out_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                if let Err(e) = fs::set_permissions(&out_path, fs::Permissions::from_mode(mode)) {
                    tracing::warn!("Failed to set permissions on {}: {e}", out_path.display());
                }
            }
        }
    }
    Ok(())
}

/// Host `tar` keeps the symlinks inside the distribution intact.
fn extract_tarball_to(tar_gz_path: &Path, dest: &Path) -> miette::Result<()> {
    // tar runs inside `dest`, so a relative archive path would not resolve.
    let archive = fs::canonicalize(tar_gz_path).map_err(|e| unpack_failed(tar_gz_path, e))?;
    let output = CommandBuilder::new("tar")
        .arg("-xzf")
        .arg(archive.to_string_lossy())
        .cwd(dest)
        .exec()
        .map_err(|e| GraalError::ExtractionFailed {
            message: format!("Failed to run tar: {e}"),
            code: None,
        })?;

    if let Some(code) = process::exit_code_of("tar", output.status)? {
        return Err(GraalError::ExtractionFailed {
            message: format!(
                "tar exited with code {code} for {}: {}",
                tar_gz_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            code: Some(code),
        }
        .into());
    }
    Ok(())
}

fn staging_prefix(dir_name: &str) -> String {
    format!(".{dir_name}-")
}

/// Remove staging directories for `dir_name` under `version_dir` that have
/// not been modified for `max_age`. Younger ones may belong to a concurrent
/// install and are left alone.
pub fn sweep_stale_staging(version_dir: &Path, dir_name: &str, max_age: Duration) {
    let prefix = staging_prefix(dir_name);
    let Ok(entries) = fs::read_dir(version_dir) else {
        return;
    };
    let now = SystemTime::now();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(&prefix) {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_dir() {
            continue;
        }
        let age = meta
            .modified()
            .ok()
            .and_then(|m| now.duration_since(m).ok())
            .unwrap_or_default();
        if age < max_age {
            continue;
        }
        tracing::debug!("removing stale staging directory {}", entry.path().display());
        if let Err(e) = fs::remove_dir_all(entry.path()) {
            tracing::warn!("Failed to remove {}: {e}", entry.path().display());
        }
    }
}
