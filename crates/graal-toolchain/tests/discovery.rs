mod common;

use std::fs;

use graal_core::platform::Platform;
use graal_core::version::JavaVersion;
use graal_toolchain::{provision_toolchain, CacheLayout, Distribution, ResolvedPaths, ToolchainHandle};
use graal_util::errors::GraalError;

use common::{class_of, serve_once, write_file, zip_bytes, UNREACHABLE};

fn windows_paths(root: &std::path::Path, url: String) -> ResolvedPaths {
    let d = Distribution::new("22.1.0", JavaVersion::Java11, Platform::windows_amd64());
    ResolvedPaths::for_distribution(d, url, &CacheLayout::new(root)).unwrap()
}

#[test]
fn provisioning_downloads_extracts_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let body = zip_bytes(&[
        ("graalvm-ce-java11-22.1.0/bin/native-image.cmd", "@echo off"),
        ("graalvm-ce-java11-22.1.0/bin/gu.cmd", "@echo off"),
    ]);
    let (base, server) = serve_once("200 OK", body);
    let paths = windows_paths(dir.path(), format!("{base}/graalvm.zip"));

    let handle = provision_toolchain(&paths).unwrap();
    server.join().unwrap();
    assert_eq!(handle.native_image, paths.native_image);
    assert_eq!(handle.home, paths.tree_root);
    assert!(paths.archive.is_file());

    // The server is gone: a second run must not touch the network.
    let again = provision_toolchain(&paths).unwrap();
    assert_eq!(again, handle);
}

#[test]
fn provisioning_a_cached_tree_is_offline() {
    let dir = tempfile::tempdir().unwrap();
    let paths = windows_paths(dir.path(), UNREACHABLE.to_string());
    write_file(&paths.archive, "archive");
    write_file(&paths.native_image, "@echo off");

    let handle = provision_toolchain(&paths).unwrap();
    assert_eq!(handle.gu, paths.gu);
}

#[test]
fn provisioning_without_network_fails_with_download_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = windows_paths(dir.path(), format!("{UNREACHABLE}/graalvm.zip"));
    let err = provision_toolchain(&paths).unwrap_err();
    assert!(matches!(class_of(&err), GraalError::DownloadFailed { .. }));
    assert!(!paths.tree_root.exists());
}

#[test]
fn opening_a_tree_without_native_image_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let paths = windows_paths(dir.path(), UNREACHABLE.to_string());
    fs::create_dir_all(paths.tree_root.join("bin")).unwrap();

    let err = ToolchainHandle::open(&paths).unwrap_err();
    assert!(matches!(class_of(&err), GraalError::ToolchainCorrupt { .. }));
}

#[test]
fn opening_a_missing_tree_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let paths = windows_paths(dir.path(), UNREACHABLE.to_string());
    let err = ToolchainHandle::open(&paths).unwrap_err();
    assert!(err.to_string().contains("not extracted"));
}
