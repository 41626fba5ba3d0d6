//! Pure formatting functions for UI output.
//!
//! Colors come from `console`, which drops styling automatically when the
//! output is not a terminal.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::domain::{ChangeType, Version};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version transition produced by a bump.
///
/// # Arguments
/// * `current` - Version read from the manifest
/// * `new` - Version written back
/// * `change_type` - Classification that drove the bump
pub fn display_version_change(current: &str, new: &str, change_type: ChangeType) {
    eprintln!("\n{}", style(format!("{} release", change_type)).bold());
    eprintln!("  From: {}", style(current).red());
    eprintln!("  To:   {}", style(new).green());
}

/// Print a classification result on stdout so it can be captured.
pub fn display_classification(change_type: ChangeType) {
    println!("{}", change_type);
}

/// Print the components of a validated version.
pub fn display_version(version: &Version) {
    println!("major={}", version.major);
    println!("minor={}", version.minor);
    println!("patch={}", version.patch);
    println!("prerelease={}", version.prerelease.as_deref().unwrap_or(""));
    println!("build={}", version.build.as_deref().unwrap_or(""));
}
