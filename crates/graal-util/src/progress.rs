//! Terminal feedback on stderr: Cargo-style status lines and a download bar.

use std::io::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

fn line(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}

/// `  Downloading GraalVM 22.1.0 (Java 11)`, label right-aligned in bold green.
pub fn status(label: &str, message: &str) {
    line(Style::new().green().bold(), label, message);
}

/// Same layout with a bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    line(Style::new().yellow().bold(), label, message);
}

/// Byte-count progress bar for a download of `len` bytes.
pub fn download_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/dim} {bytes}/{total_bytes} ({eta})")
            .expect("valid template")
            .progress_chars("##-"),
    );
    pb
}
