//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print server status
    pub fn server_status(&self, state: &str) {
        eprintln!("{} Server: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for the session report)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Render a possibly empty value for display
    pub fn or_unset<'a>(&self, value: &'a str) -> &'a str {
        if value.is_empty() {
            "(not set)"
        } else {
            value
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
