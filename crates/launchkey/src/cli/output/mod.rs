//! Terminal rendering for signing plans
//!
//! Warnings are not printed here. They go through `tracing`, so each
//! condition is reported once on stderr whatever the output format.

use std::fmt::Display;
use std::path::Path;

use console::style;

use launchkey_signing::SigningDecision;

/// Print an error to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a completed step
pub fn done(message: impl Display) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a hint about what to do next
pub fn hint(message: impl Display) {
    println!("{} {}", style("→").blue(), message);
}

/// Print a section title, separated from the previous section
pub fn section(title: &str, first: bool) {
    if !first {
        println!();
    }
    println!("{}", style(title).bold());
}

/// Print an indented `label: value` line
pub fn field(label: &str, value: impl Display) {
    println!("{}", format_field(label, value));
}

fn format_field(label: &str, value: impl Display) -> String {
    format!("  {}: {}", style(label).dim(), value)
}

/// Styled path for inline display
pub fn path(path: &Path) -> String {
    style(path.display()).cyan().to_string()
}

/// Release in green, debug in yellow
pub fn identity_label(decision: &SigningDecision) -> String {
    let name = decision.config_name();
    if decision.is_release() {
        style(name).green().to_string()
    } else {
        style(name).yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstyled_rendering() {
        console::set_colors_enabled(false);

        assert_eq!(format_field("Key alias", "upload"), "  Key alias: upload");
        assert_eq!(
            path(Path::new("/project/android/key.properties")),
            "/project/android/key.properties"
        );
        assert_eq!(identity_label(&SigningDecision::DebugIdentity), "debug");
    }
}
