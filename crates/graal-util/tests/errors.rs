use graal_util::errors::GraalError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = GraalError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_unsupported_platform_display() {
    let err = GraalError::UnsupportedPlatform {
        platform: "UNKNOWN".to_string(),
    };
    assert_eq!(err.to_string(), "No GraalVM support for UNKNOWN");
}

#[test]
fn test_invalid_configuration_display() {
    let err = GraalError::InvalidConfiguration {
        message: "Use 'outputName' instead of '-H:Name=foo'".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid configuration: Use 'outputName' instead of '-H:Name=foo'"
    );
}

#[test]
fn test_download_failed_mentions_url() {
    let err = GraalError::DownloadFailed {
        url: "https://example.com/graal.tar.gz".to_string(),
        message: "HTTP 404 Not Found".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("https://example.com/graal.tar.gz"));
    assert!(text.contains("404"));
}

#[test]
fn test_compilation_failed_surfaces_child_code() {
    let err = GraalError::CompilationFailed {
        message: "native-image exited with code 3".to_string(),
        code: 3,
    };
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_extraction_failed_code() {
    let with_code = GraalError::ExtractionFailed {
        message: "tar exited with code 2".to_string(),
        code: Some(2),
    };
    let without_code = GraalError::ExtractionFailed {
        message: "bad zip".to_string(),
        code: None,
    };
    assert_eq!(with_code.exit_code(), 2);
    assert_eq!(without_code.exit_code(), 1);
}

#[test]
fn test_other_errors_exit_one() {
    let err = GraalError::ToolchainCorrupt {
        message: "gu missing".to_string(),
        code: None,
    };
    assert_eq!(err.exit_code(), 1);
    let err = GraalError::WindowsEnvUnavailable {
        message: "nothing found".to_string(),
    };
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_downcast_from_report() {
    let report: miette::Report = GraalError::InvalidConfiguration {
        message: "x".to_string(),
    }
    .into();
    assert!(matches!(
        report.downcast_ref::<GraalError>(),
        Some(GraalError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_failed_gu_repair_surfaces_its_exit_code() {
    let err = GraalError::ToolchainCorrupt {
        message: "`gu install native-image` exited with code 3".to_string(),
        code: Some(3),
    };
    assert_eq!(err.exit_code(), 3);
}
