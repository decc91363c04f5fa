#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use graal_core::config::GraalConfig;
use graal_core::platform::Platform;
use graal_ops::{ops_build, ops_paths, ops_provision, ProjectContext};
use graal_toolchain::CacheLayout;
use graal_util::errors::GraalError;

const FAKE_NATIVE_IMAGE: &str = r#"#!/bin/sh
for a in "$@"; do
  case "$a" in
    -H:Path=*) out="${a#-H:Path=}" ;;
    -H:Name=*) name="${a#-H:Name=}" ;;
    --shared) ext=".so" ;;
  esac
done
echo "$@" > "$out/$name$ext"
"#;

fn context(root: &Path) -> ProjectContext {
    let mut config = GraalConfig::new();
    config
        .set_graal_version("22.1.0")
        .set_java_version("11")
        .set_download_base_url("http://127.0.0.1:1/unreachable")
        .set_main_class("com.example.Main")
        .set_output_name("app")
        .set_jar_file(root.join("app.jar"));
    ProjectContext::new(
        config,
        Platform::linux_amd64(),
        CacheLayout::new(root.join("cache")),
        root.join("build"),
    )
}

/// Populate the cache as if a previous run had provisioned it.
fn seed_cache(ctx: &ProjectContext, native_image: &str) {
    let paths = ctx.resolved_paths().unwrap();
    fs::create_dir_all(paths.native_image.parent().unwrap()).unwrap();
    fs::write(&paths.archive, "archive").unwrap();
    fs::write(&paths.native_image, native_image).unwrap();
    fs::set_permissions(&paths.native_image, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn provision_then_build_executable() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    seed_cache(&ctx, FAKE_NATIVE_IMAGE);

    let handle = ops_provision::provision_toolchain(&ctx).unwrap();
    let artifact = ops_build::build_executable(&ctx, &handle).unwrap();

    assert_eq!(artifact, dir.path().join("build/graal/app"));
    let args = fs::read_to_string(&artifact).unwrap();
    assert!(args.starts_with("-cp "));
    assert!(args.trim_end().ends_with("-H:Name=app com.example.Main"));
}

#[test]
fn provision_then_build_shared_library() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    seed_cache(&ctx, FAKE_NATIVE_IMAGE);

    let handle = ops_provision::provision_toolchain(&ctx).unwrap();
    let artifact = ops_build::build_shared_library(&ctx, &handle).unwrap();

    assert_eq!(artifact, dir.path().join("build/graal/app.so"));
    let args = fs::read_to_string(&artifact).unwrap();
    assert!(args.starts_with("--shared -cp "));
}

#[test]
fn failing_compiler_surfaces_its_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    seed_cache(&ctx, "#!/bin/sh\nexit 3\n");

    let handle = ops_provision::provision_toolchain(&ctx).unwrap();
    let err = ops_build::build_executable(&ctx, &handle).unwrap_err();
    let graal = err.downcast_ref::<GraalError>().unwrap();
    assert!(matches!(graal, GraalError::CompilationFailed { code: 3, .. }));
    assert_eq!(graal.exit_code(), 3);
}

#[test]
fn download_only_skips_cached_archive() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    seed_cache(&ctx, FAKE_NATIVE_IMAGE);

    let archive = ops_provision::download_only(&ctx).unwrap();
    assert_eq!(fs::read_to_string(archive).unwrap(), "archive");
}

#[test]
fn paths_report_marks_missing_pieces() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let paths = ops_paths::resolved_paths(&ctx).unwrap();
    let rows = ops_paths::describe(&paths);

    assert_eq!(rows[0].0, "url");
    assert!(rows[0].1.ends_with("graalvm-ce-java11-linux-amd64-22.1.0.tar.gz"));
    assert!(rows.iter().skip(1).all(|(_, v)| v.ends_with("(missing)")));

    seed_cache(&ctx, FAKE_NATIVE_IMAGE);
    let rows = ops_paths::describe(&paths);
    assert!(rows.iter().all(|(_, v)| !v.ends_with("(missing)")));
}
