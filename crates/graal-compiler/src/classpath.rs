//! Classpath assembly for `native-image -cp`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use graal_core::platform::Platform;
use graal_util::errors::GraalError;

/// Classpath entries followed by the application jar, keeping the first
/// occurrence of every path.
pub fn assemble(classpath: &[PathBuf], jar: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    classpath
        .iter()
        .map(PathBuf::as_path)
        .chain(std::iter::once(jar))
        .filter(|p| seen.insert(*p))
        .map(Path::to_path_buf)
        .collect()
}

/// Join entries with `separator`.
pub fn to_classpath_string(entries: &[PathBuf], separator: &str) -> String {
    entries
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(separator)
}

/// The `-cp` value for `platform`.
pub fn classpath_arg(
    classpath: &[PathBuf],
    jar: &Path,
    platform: Platform,
) -> Result<String, GraalError> {
    Ok(to_classpath_string(
        &assemble(classpath, jar),
        platform.path_separator()?,
    ))
}
