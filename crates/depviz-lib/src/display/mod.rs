//! Terminal display system
//!
//! User-facing status lines, kept apart from `tracing` logs. The global
//! instance is initialised once with the resolved colour decision.

use crate::primitives::ConfigError;
use std::sync::OnceLock;

pub mod status;
pub mod styling;

pub use status::StatusDisplay;
pub use styling::StyleManager;

static GLOBAL_DISPLAY: OnceLock<Display> = OnceLock::new();

/// Main display manager that coordinates all user-facing communication
#[derive(Debug)]
pub struct Display {
    styling: StyleManager,
}

impl Display {
    /// Initialize global display system
    pub fn init(color: bool) -> Result<&'static Self, ConfigError> {
        GLOBAL_DISPLAY
            .set(Display {
                styling: StyleManager::new(color),
            })
            .map_err(|_| ConfigError::AlreadyInitialized)?;

        GLOBAL_DISPLAY.get().ok_or(ConfigError::AlreadyInitialized)
    }

    /// Global instance, if initialised
    pub fn global() -> Option<&'static Self> {
        GLOBAL_DISPLAY.get()
    }

    /// Status updates with semantic intent
    pub fn status(&self) -> StatusDisplay<'_> {
        StatusDisplay::new(&self.styling)
    }
}
