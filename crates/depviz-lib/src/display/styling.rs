//! Semantic styles for status lines
//!
//! Wraps `console::Style` so callers ask for *success* or *warning* rather
//! than a colour. With colour disabled every style renders plain text.

use console::Style;

pub const CHECKMARK: &str = "✓";
pub const CROSS: &str = "✗";
pub const WARNING_SYMBOL: &str = "!";
pub const INFO_SYMBOL: &str = "·";

/// Style manager resolved once from the colour intent
#[derive(Debug, Clone)]
pub struct StyleManager {
    color: bool,
    success: Style,
    error: Style,
    warning: Style,
    info: Style,
    emphasis: Style,
    subtle: Style,
}

impl StyleManager {
    pub fn new(color: bool) -> Self {
        let base = Style::new().force_styling(color);
        Self {
            color,
            success: base.clone().green(),
            error: base.clone().red(),
            warning: base.clone().yellow(),
            info: base.clone().cyan(),
            emphasis: base.clone().bold(),
            subtle: base.dim(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn style_success(&self, text: &str) -> String {
        self.success.apply_to(text).to_string()
    }

    pub fn style_error(&self, text: &str) -> String {
        self.error.apply_to(text).to_string()
    }

    pub fn style_warning(&self, text: &str) -> String {
        self.warning.apply_to(text).to_string()
    }

    pub fn style_info(&self, text: &str) -> String {
        self.info.apply_to(text).to_string()
    }

    /// Bold
    pub fn style_emphasis(&self, text: &str) -> String {
        self.emphasis.apply_to(text).to_string()
    }

    pub fn style_subtle(&self, text: &str) -> String {
        self.subtle.apply_to(text).to_string()
    }

    /// Format success message with symbol and styling
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    /// Format error message with symbol and styling
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    /// Format warning message with symbol and styling
    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(WARNING_SYMBOL), message)
    }

    /// Format info message with symbol and styling
    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(INFO_SYMBOL), message)
    }
}
