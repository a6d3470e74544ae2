//! Status display for user feedback
//!
//! Status lines go to stderr so stdout carries only the report itself and
//! can be piped.

use super::styling::StyleManager;
use std::io::{self, Write};

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    fn emit(&self, line: String) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }

    fn join(item: &str, details: &str) -> String {
        if details.is_empty() {
            item.to_string()
        } else {
            format!("{}: {}", item, details)
        }
    }

    /// Display a success status with optional details
    ///
    /// Output: `✓ Newtonsoft.Json: 12 packages`
    pub fn success(&self, item: &str, details: &str) {
        self.emit(self.styling.format_success(&Self::join(item, details)));
    }

    /// Display an error status with details
    ///
    /// Output: `✗ Missing.Package: not found`
    pub fn error(&self, item: &str, details: &str) {
        self.emit(self.styling.format_error(&Self::join(item, details)));
    }

    /// Output: `! build cancelled`
    pub fn warning(&self, message: &str) {
        self.emit(self.styling.format_warning(message));
    }

    /// Output: `· wrote report to deps.txt`
    pub fn info(&self, message: &str) {
        self.emit(self.styling.format_info(message));
    }

    pub fn subtle(&self, text: &str) {
        self.emit(self.styling.style_subtle(text));
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
