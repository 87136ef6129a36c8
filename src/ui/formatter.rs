//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text, `display_*` functions print it.

use console::style;

use crate::analyzer::ResolvedVersion;
use crate::domain::ReleaseDescriptor;
use crate::git::GitOperation;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summary of what resolution found: the tag list, the latest version and
/// the version chosen for this release.
pub fn format_resolution(resolved: &ResolvedVersion) -> String {
    let mut out = format!("version tags: {:?}\n", resolved.tags);
    if !resolved.skipped.is_empty() {
        out.push_str(&format!(
            "skipped {} non-version tag(s)\n",
            resolved.skipped.len()
        ));
    }
    out.push_str(&format!("got latest version: {}\n", resolved.latest.tag));
    out.push_str(&format!("got a new version: {}", resolved.next));
    out
}

pub fn display_resolution(resolved: &ResolvedVersion) {
    println!("{}", format_resolution(resolved));
}

/// Names of the branch and tag about to be published.
pub fn format_release(release: &ReleaseDescriptor) -> String {
    format!(
        "{}\n  Branch: {}\n  Tag:    {}",
        style(format!("Release {}", release.version)).bold(),
        style(&release.branch).cyan(),
        style(&release.tag).green()
    )
}

pub fn display_release(release: &ReleaseDescriptor) {
    println!("\n{}", format_release(release));
}

/// Numbered list of the commands a dry run would execute.
pub fn format_dry_run_plan(operations: &[GitOperation]) -> String {
    let mut out = format!("{}", style("Dry run, would execute:").bold());
    for (i, operation) in operations.iter().enumerate() {
        out.push_str(&format!("\n  Step {}: {}", i + 1, style(operation).cyan()));
    }
    out
}

pub fn display_dry_run_plan(operations: &[GitOperation]) {
    println!("{}", format_dry_run_plan(operations));
}
