//! Compile one invocation with a launcher and report the artifact.

use std::path::{Path, PathBuf};

use graal_util::errors::GraalError;
use graal_util::progress;

use crate::invocation::Invocation;
use crate::launcher::Launcher;

/// Create the output directory, run `native-image` and return the artifact path.
pub fn compile(
    invocation: &Invocation,
    native_image: &Path,
    launcher: &dyn Launcher,
) -> miette::Result<PathBuf> {
    graal_util::fs::ensure_dir(&invocation.output_dir).map_err(GraalError::Io)?;
    progress::status(
        "Compiling",
        &format!(
            "{} {}",
            invocation.kind,
            invocation
                .output_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ),
    );

    launcher.launch(native_image, &invocation.args)?;

    let size = graal_util::fs::size_megabytes(&invocation.output_file).unwrap_or(0);
    let report = format!(
        "{} available at {} ({size} MB)",
        invocation.kind,
        invocation.output_file.display()
    );
    tracing::info!("{report}");
    progress::status("Finished", &report);
    Ok(invocation.output_file.clone())
}
