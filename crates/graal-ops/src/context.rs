//! Everything one host invocation needs: configuration, platform, cache and
//! build directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use graal_core::config::{GraalConfig, GraalManifest, MANIFEST_FILE};
use graal_core::platform::Platform;
use graal_toolchain::msvc::VsLocator;
use graal_toolchain::{CacheLayout, ResolvedPaths};
use graal_util::fs::absolutize;

/// Values supplied on the command line, applied on top of `graal.toml`.
///
/// Relative paths are resolved against the directory the host runs in.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub graal_version: Option<String>,
    pub java_version: Option<String>,
    pub download_base_url: Option<String>,
    pub main_class: Option<String>,
    pub output_name: Option<String>,
    pub jar: Option<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub options: Vec<String>,
    pub build_dir: Option<PathBuf>,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: GraalConfig,
    pub platform: Platform,
    pub cache: CacheLayout,
    pub build_dir: PathBuf,
    pub vs_locator: VsLocator,
}

impl ProjectContext {
    pub fn new(
        config: GraalConfig,
        platform: Platform,
        cache: CacheLayout,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            platform,
            cache,
            build_dir: build_dir.into(),
            vs_locator: VsLocator::default(),
        }
    }

    pub fn with_vs_locator(mut self, locator: VsLocator) -> Self {
        self.vs_locator = locator;
        self
    }

    /// Load `graal.toml` from `start_dir` or the nearest ancestor holding
    /// one, then apply `overrides`. Without a file the defaults apply and
    /// `start_dir` acts as the project directory.
    pub fn load(start_dir: &Path, overrides: &Overrides) -> miette::Result<Self> {
        let (manifest, project_dir) =
            match graal_util::fs::find_ancestor_with(start_dir, MANIFEST_FILE) {
                Some(dir) => {
                    let manifest = GraalManifest::load(&dir.join(MANIFEST_FILE))?;
                    tracing::debug!("loaded {}", dir.join(MANIFEST_FILE).display());
                    (manifest, dir)
                }
                None => {
                    tracing::debug!(
                        "no {MANIFEST_FILE} above {}, using defaults",
                        start_dir.display()
                    );
                    (GraalManifest::default(), start_dir.to_path_buf())
                }
            };

        let manifest_build_dir = manifest.graal.build_dir.clone();
        let mut properties = manifest.properties;
        let mut config = GraalConfig::from_manifest(manifest.graal, &project_dir);
        apply(&mut config, overrides, start_dir);
        properties.extend(overrides.properties.clone());

        let build_dir = match (&overrides.build_dir, manifest_build_dir) {
            (Some(dir), _) => absolutize(start_dir, dir),
            (None, Some(dir)) => absolutize(&project_dir, &dir),
            (None, None) => project_dir.join("build"),
        };

        Ok(Self::new(
            config,
            Platform::current(),
            CacheLayout::from_properties(&properties),
            build_dir,
        ))
    }

    /// Cache locations for the configured distribution on this platform.
    pub fn resolved_paths(&self) -> miette::Result<ResolvedPaths> {
        ResolvedPaths::resolve(&self.config, self.platform, &self.cache)
    }
}

fn apply(config: &mut GraalConfig, overrides: &Overrides, cwd: &Path) {
    if let Some(v) = &overrides.graal_version {
        config.set_graal_version(v.as_str());
    }
    if let Some(j) = &overrides.java_version {
        config.set_java_version(j.as_str());
    }
    if let Some(url) = &overrides.download_base_url {
        config.set_download_base_url(url.as_str());
    }
    if let Some(main) = &overrides.main_class {
        config.set_main_class(main.as_str());
    }
    if let Some(name) = &overrides.output_name {
        config.set_output_name(name.as_str());
    }
    if let Some(jar) = &overrides.jar {
        config.set_jar_file(absolutize(cwd, jar));
    }
    for entry in &overrides.classpath {
        config.add_classpath_entry(absolutize(cwd, entry));
    }
    config.extend_options(overrides.options.iter().map(String::as_str));
}
