//! Operation: report where the configured toolchain lives, offline.

use graal_toolchain::ResolvedPaths;

use crate::context::ProjectContext;

pub fn resolved_paths(ctx: &ProjectContext) -> miette::Result<ResolvedPaths> {
    ctx.resolved_paths()
}

/// Label/value rows for display, with install state.
pub fn describe(paths: &ResolvedPaths) -> Vec<(&'static str, String)> {
    let state = |present: bool| if present { "" } else { " (missing)" };
    vec![
        ("url", paths.archive_url.clone()),
        (
            "archive",
            format!("{}{}", paths.archive.display(), state(paths.archive.is_file())),
        ),
        (
            "home",
            format!("{}{}", paths.tree_root.display(), state(paths.tree_root.is_dir())),
        ),
        (
            "native-image",
            format!(
                "{}{}",
                paths.native_image.display(),
                state(paths.native_image.is_file())
            ),
        ),
    ]
}
