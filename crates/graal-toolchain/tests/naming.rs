use std::collections::HashSet;
use std::path::PathBuf;

use graal_core::config::GraalConfig;
use graal_core::platform::{Architecture, OperatingSystem, Platform};
use graal_core::version::JavaVersion;
use graal_toolchain::{CacheLayout, Distribution, ResolvedPaths};
use graal_util::errors::GraalError;

const BASE: &str = "https://example.invalid/releases/download/";

fn dist(v: &str, j: JavaVersion, p: Platform) -> Distribution {
    Distribution::new(v, j, p)
}

#[test]
fn linux_modern_release_url() {
    let d = dist("22.1.0", JavaVersion::Java11, Platform::linux_amd64());
    let url = d.archive_url(BASE).unwrap();
    assert_eq!(
        url,
        "https://example.invalid/releases/download/vm-22.1.0/graalvm-ce-java11-linux-amd64-22.1.0.tar.gz"
    );
    assert_eq!(d.archive_file_name().unwrap(), "graalvm-ce-java11-22.1.0-amd64.tar.gz");
    assert_eq!(d.directory_name(), "graalvm-ce-java11-22.1.0");
    assert_eq!(
        d.binary_rel_path("native-image").unwrap(),
        PathBuf::from("bin").join("native-image")
    );
}

#[test]
fn mac_release_candidate_naming() {
    let d = dist("1.0.0-rc12", JavaVersion::Java8, Platform::mac_amd64());
    let url = d.archive_url(BASE).unwrap();
    assert!(url.ends_with("/vm-1.0.0-rc12/graalvm-ce-1.0.0-rc12-macos-amd64.tar.gz"));
    assert!(!url.contains("java8"));
    assert!(!url.contains("--"));
    assert_eq!(d.archive_file_name().unwrap(), "graalvm-ce-1.0.0-rc12-amd64.tar.gz");
    assert_eq!(d.directory_name(), "graalvm-ce-1.0.0-rc12");
    assert_eq!(
        d.binary_rel_path("native-image").unwrap(),
        PathBuf::from("Contents/Home/bin/native-image")
    );
}

#[test]
fn mac_modern_release_uses_darwin() {
    let d = dist("21.1.0", JavaVersion::Java16, Platform::mac_amd64());
    let url = d.archive_url(BASE).unwrap();
    assert!(url.ends_with("/vm-21.1.0/graalvm-ce-java16-darwin-amd64-21.1.0.tar.gz"));
}

#[test]
fn legacy_release_has_no_java_tag() {
    let d = dist("19.2.1", JavaVersion::Java8, Platform::linux_amd64());
    let url = d.archive_url(BASE).unwrap();
    assert!(url.ends_with("/vm-19.2.1/graalvm-ce-linux-amd64-19.2.1.tar.gz"));
    assert_eq!(d.directory_name(), "graalvm-ce-19.2.1");
}

#[test]
fn windows_release_is_zip_with_cmd_launchers() {
    let d = dist("22.1.0", JavaVersion::Java11, Platform::windows_amd64());
    let url = d.archive_url(BASE).unwrap();
    assert!(url.ends_with("-windows-amd64-22.1.0.zip"));
    assert_eq!(d.archive_file_name().unwrap(), "graalvm-ce-java11-22.1.0-amd64.zip");
    assert_eq!(
        d.binary_rel_path("native-image").unwrap(),
        PathBuf::from("bin").join("native-image.cmd")
    );
    assert_eq!(
        d.binary_rel_path("gu").unwrap(),
        PathBuf::from("bin").join("gu.cmd")
    );
    assert_eq!(
        d.binary_rel_path("java").unwrap(),
        PathBuf::from("bin").join("java.exe")
    );
}

#[test]
fn dev_build_naming() {
    let d = dist(
        "22.2.0-dev-20220502_1208",
        JavaVersion::Java11,
        Platform::linux_amd64(),
    );
    let url = d.archive_url(BASE).unwrap();
    assert!(url.ends_with(
        "/22.2.0-dev-20220502_1208/graalvm-ce-java11-linux-amd64-dev.tar.gz"
    ));
    assert_eq!(d.directory_name(), "graalvm-ce-java11-22.2.0-dev");
}

#[test]
fn base_url_slashes_are_normalised() {
    let d = dist("22.1.0", JavaVersion::Java11, Platform::linux_amd64());
    let with = d.archive_url("https://mirror.invalid/dl/").unwrap();
    let without = d.archive_url("https://mirror.invalid/dl").unwrap();
    assert_eq!(with, without);
    assert!(with.starts_with("https://mirror.invalid/dl/vm-22.1.0/"));
}

#[test]
fn double_dash_in_base_url_is_kept() {
    let d = dist("1.0.0-rc12", JavaVersion::Java8, Platform::linux_amd64());
    let url = d.archive_url("https://mirror--a.invalid/dl").unwrap();
    assert!(url.starts_with("https://mirror--a.invalid/dl/"));
}

#[test]
fn urls_differ_whenever_a_component_differs() {
    let versions = ["1.0.0-rc12", "19.2.1", "19.3.0", "21.1.0", "22.1.0"];
    let platforms = [
        Platform::linux_amd64(),
        Platform::mac_amd64(),
        Platform::windows_amd64(),
    ];
    let mut seen = HashSet::new();
    let mut total = 0;
    for v in versions {
        for j in [JavaVersion::Java8, JavaVersion::Java11, JavaVersion::Java16] {
            if j.check_compatible(v).is_err() {
                continue;
            }
            for p in platforms {
                let d = dist(v, j, p);
                let Ok(url) = d.archive_url(BASE) else {
                    continue;
                };
                // Composition is deterministic.
                assert_eq!(url, d.archive_url(BASE).unwrap());
                total += 1;
                assert!(seen.insert(url.clone()), "duplicate URL {url}");
            }
        }
    }
    assert!(total > 10);
}

#[test]
fn release_candidate_on_windows_is_unsupported() {
    let d = dist("1.0.0-rc12", JavaVersion::Java8, Platform::windows_amd64());
    assert!(matches!(
        d.archive_url(BASE),
        Err(GraalError::UnsupportedPlatform { .. })
    ));
}

#[test]
fn unknown_platform_is_unsupported() {
    let d = dist(
        "22.1.0",
        JavaVersion::Java11,
        Platform::new(OperatingSystem::Linux, Architecture::Unknown),
    );
    let err = d.archive_url(BASE).unwrap_err();
    assert_eq!(err.to_string(), "No GraalVM support for UNKNOWN");

    let d = dist(
        "22.1.0",
        JavaVersion::Java11,
        Platform::new(OperatingSystem::Unknown, Architecture::Amd64),
    );
    assert!(d.archive_file_name().is_err());
    assert!(d.binary_rel_path("native-image").is_err());
}

#[test]
fn resolved_paths_follow_cache_layout() {
    let mut config = GraalConfig::new();
    config.set_graal_version("22.1.0").set_java_version("11");
    let layout = CacheLayout::new("/cache");
    let paths = ResolvedPaths::resolve(&config, Platform::linux_amd64(), &layout).unwrap();

    let version_dir = PathBuf::from("/cache").join("22.1.0").join("11");
    assert_eq!(paths.version_dir, version_dir);
    assert_eq!(
        paths.archive,
        version_dir.join("graalvm-ce-java11-22.1.0-amd64.tar.gz")
    );
    assert_eq!(paths.tree_root, version_dir.join("graalvm-ce-java11-22.1.0"));
    assert_eq!(
        paths.native_image,
        paths.tree_root.join("bin").join("native-image")
    );
    assert_eq!(paths.gu, paths.tree_root.join("bin").join("gu"));
    assert_eq!(
        paths.archive_url,
        "https://github.com/graalvm/graalvm-ce-builds/releases/download/vm-22.1.0/graalvm-ce-java11-linux-amd64-22.1.0.tar.gz"
    );
}

#[test]
fn resolved_paths_reject_bad_java_combination() {
    let mut config = GraalConfig::new();
    config.set_java_version("16");
    let err = ResolvedPaths::resolve(&config, Platform::linux_amd64(), &CacheLayout::new("/c"))
        .unwrap_err();
    assert!(err.to_string().contains("needs >= 21.1.0"));
}

#[test]
fn cache_dir_property_relocates_root() {
    let mut props = std::collections::BTreeMap::new();
    props.insert(
        "com.palantir.graal.cache.dir".to_string(),
        "/opt/graal-cache".to_string(),
    );
    let layout = CacheLayout::from_properties(&props);
    assert_eq!(layout.root(), std::path::Path::new("/opt/graal-cache"));
}
