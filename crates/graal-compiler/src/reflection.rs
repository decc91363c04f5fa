//! `reflectconfig.json` for classes accessed reflectively at image run time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use graal_util::errors::GraalError;

use crate::invocation;

pub const REFLECTION_CONFIG_FILE: &str = "reflectconfig.json";

/// One class entry; every member category is opened up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionEntry {
    pub name: String,
    pub all_declared_constructors: bool,
    pub all_public_constructors: bool,
    pub all_declared_methods: bool,
    pub all_public_methods: bool,
    pub all_declared_fields: bool,
    pub all_public_fields: bool,
}

impl ReflectionEntry {
    pub fn all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            all_declared_constructors: true,
            all_public_constructors: true,
            all_declared_methods: true,
            all_public_methods: true,
            all_declared_fields: true,
            all_public_fields: true,
        }
    }
}

/// `<build_dir>/graal/reflectconfig.json`
pub fn reflection_config_path(build_dir: &Path) -> PathBuf {
    invocation::output_dir(build_dir).join(REFLECTION_CONFIG_FILE)
}

/// Pretty-printed JSON array, one entry per class.
pub fn render(classes: &[String]) -> Result<String, GraalError> {
    let entries: Vec<ReflectionEntry> = classes
        .iter()
        .map(|c| ReflectionEntry::all(c.as_str()))
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|e| GraalError::InvalidConfiguration {
        message: format!("Failed to serialize reflection config: {e}"),
    })
}

/// Write the file for `classes`. Nothing is written for an empty list.
pub fn write_reflection_config(
    classes: &[String],
    build_dir: &Path,
) -> miette::Result<Option<PathBuf>> {
    if classes.is_empty() {
        tracing::debug!("no reflection classes configured, skipping {REFLECTION_CONFIG_FILE}");
        return Ok(None);
    }
    let path = reflection_config_path(build_dir);
    let json = render(classes)?;
    graal_util::fs::write_atomic(&path, json.as_bytes()).map_err(GraalError::Io)?;
    tracing::info!("wrote {} ({} classes)", path.display(), classes.len());
    Ok(Some(path))
}
