//! GraalVM archive download into the toolchain cache.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use graal_util::errors::GraalError;
use graal_util::progress;

use crate::cache::ResolvedPaths;

fn failed(url: &str, message: impl Into<String>) -> GraalError {
    GraalError::DownloadFailed {
        url: url.to_string(),
        message: message.into(),
    }
}

/// Fetch the distribution archive unless it is already cached.
///
/// Returns `true` if a download happened, `false` if the archive was present.
pub fn download_archive(paths: &ResolvedPaths) -> miette::Result<bool> {
    if paths.archive.is_file() {
        tracing::debug!("archive already cached at {}", paths.archive.display());
        return Ok(false);
    }
    progress::status(
        "Downloading",
        &format!(
            "GraalVM {} (Java {})",
            paths.distribution.graal_version(),
            paths.distribution.java_version()
        ),
    );
    download_file(&paths.archive_url, &paths.archive)?;
    Ok(true)
}

/// Stream `url` into `dest`.
///
/// The body goes to a temporary file next to `dest` that is renamed into
/// place once complete, so `dest` is either absent or whole. On failure the
/// temporary file is removed.
pub fn download_file(url: &str, dest: &Path) -> miette::Result<()> {
    tracing::info!("Downloading {url}");

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    graal_util::fs::ensure_dir(parent)
        .map_err(|e| failed(url, format!("cannot create {}: {e}", parent.display())))?;

    let resp = reqwest::blocking::Client::builder()
        .user_agent(concat!("graal/", env!("CARGO_PKG_VERSION")))
        .timeout(Option::<Duration>::None)
        .build()
        .map_err(|e| failed(url, format!("failed to build HTTP client: {e}")))?
        .get(url)
        .send()
        .map_err(|e| failed(url, e.to_string()))?;

    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(failed(
            url,
            "HTTP 404 Not Found; this GraalVM/Java combination may not exist for your platform",
        )
        .into());
    }
    if !status.is_success() {
        return Err(failed(url, format!("HTTP {status}")).into());
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".download-")
        .tempfile_in(parent)
        .map_err(|e| failed(url, format!("cannot write to {}: {e}", parent.display())))?;

    let pb = resp.content_length().map(progress::download_bar);
    let mut reader = resp;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| failed(url, format!("read error: {e}")))?;
        if n == 0 {
            break;
        }
        tmp.write_all(&buf[..n])
            .map_err(|e| failed(url, format!("write error: {e}")))?;
        if let Some(ref pb) = pb {
            pb.inc(n as u64);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| failed(url, format!("write error: {e}")))?;
    tmp.persist(dest)
        .map_err(|e| failed(url, format!("cannot move into {}: {}", dest.display(), e.error)))?;
    tracing::debug!("saved {}", dest.display());
    Ok(())
}
