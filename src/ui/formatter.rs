//! Output formatting functions for the release flow.
//!
//! Styling goes through `console`, which drops colors automatically when
//! output is not a terminal.

use console::style;

use crate::git::GitCommand;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_latest_tag(tag: &str) {
    println!("Latest tag : {}", style(tag).cyan());
}

pub fn display_new_version(version: &str) {
    println!("New version : {}", style(version).green().bold());
}

/// Print a command that a dry run would have executed.
pub fn display_planned_command(command: &GitCommand) {
    println!("  {} {}", style("would run:").dim(), command);
}

/// Print the notice shown when the operator declines to publish.
pub fn display_abort_notice() {
    println!("{}", style("Aborted, no tag was created.").yellow());
}
