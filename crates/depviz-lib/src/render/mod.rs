//! Text renderers for built graphs
//!
//! Everything here reads the graph through its public API and the
//! [`GraphQuery`](crate::graph::GraphQuery) engine; nothing touches builder
//! state.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod plantuml;
pub mod report;
pub mod tree;

pub use plantuml::plantuml;
pub use report::{
    closure_report, config_table, cycle_report, direct_dependencies, load_order_report,
    reverse_report,
};
pub use tree::{TreeCharset, ascii_tree};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes rendered reports to disk
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `content`, creating parent directories and ending with a newline
    pub fn write(&self, content: &str) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut body = content.to_string();
        if !body.ends_with('\n') {
            body.push('\n');
        }

        std::fs::write(&self.path, body).map_err(|source| RenderError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!("Wrote report to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
