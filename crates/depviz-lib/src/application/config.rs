//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::graph::{BuildRequest, Discipline, PackageId};
use crate::networking::NetworkingConfig;
use crate::primitives::*;
use crate::provider::NUGET_FLAT_CONTAINER;
use crate::render::TreeCharset;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const REPO: &str = crate::provider::NUGET_FLAT_CONTAINER;
    pub const JOBS: &str = "4";
    pub const NET_TIMEOUT: &str = "10";
    pub const DISCIPLINE: &str = "bfs";
    pub const CHARSET: &str = "utf8";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn repo() -> String {
        NUGET_FLAT_CONTAINER.to_string()
    }

    pub fn jobs() -> usize {
        4
    }

    pub fn net_timeout() -> u64 {
        10
    }

    pub fn discipline() -> Discipline {
        Discipline::BreadthFirst
    }

    pub fn charset() -> TreeCharset {
        TreeCharset::Utf8
    }

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Root package to analyse
    #[arg(short, long, env = "DEPVIZ_PACKAGE", default_value = "")]
    #[serde(default)]
    pub package: String,

    /// Registry base URL, or the manifest file path in test mode
    #[arg(short, long, env = "DEPVIZ_REPO", default_value = defaults::REPO)]
    #[serde(default = "default_fns::repo")]
    pub repo: String,

    /// Read dependencies from a local manifest file instead of the registry
    #[arg(short, long, env = "DEPVIZ_TEST_MODE")]
    #[serde(default)]
    pub test_mode: bool,

    /// Print the full dependency tree instead of direct dependencies
    #[arg(short, long, env = "DEPVIZ_ASCII_TREE")]
    #[serde(default)]
    pub ascii_tree: bool,

    /// Maximum traversal depth (edges from the root); unbounded when omitted
    #[arg(short = 'd', long, env = "DEPVIZ_MAX_DEPTH")]
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Skip dependencies whose name contains this substring (case-insensitive)
    #[arg(short, long, env = "DEPVIZ_FILTER")]
    #[serde(default)]
    pub filter: Option<String>,

    /// Traversal discipline (bfs, dfs)
    #[arg(long, env = "DEPVIZ_DISCIPLINE", default_value = defaults::DISCIPLINE)]
    #[serde(default = "default_fns::discipline")]
    pub discipline: Discipline,

    /// Concurrent lookups per breadth-first tier
    #[arg(short = 'j', long, env = "DEPVIZ_JOBS", default_value = defaults::JOBS)]
    #[serde(default = "default_fns::jobs")]
    pub jobs: usize,

    /// Registry request timeout in seconds
    #[arg(long, env = "DEPVIZ_NET_TIMEOUT", default_value = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Write the report to this file instead of stdout
    #[arg(short, long, env = "DEPVIZ_OUTPUT_FILE")]
    #[serde(default)]
    pub output_file: Option<PathBuf>,

    /// Branch characters for tree output (utf8, ascii)
    #[arg(long, env = "DEPVIZ_CHARSET", default_value = defaults::CHARSET)]
    #[serde(default = "default_fns::charset")]
    pub charset: TreeCharset,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "DEPVIZ_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, pretty)
    #[arg(long, env = "DEPVIZ_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "DEPVIZ_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "DEPVIZ_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            repo: default_fns::repo(),
            test_mode: false,
            ascii_tree: false,
            max_depth: None,
            filter: None,
            discipline: default_fns::discipline(),
            jobs: default_fns::jobs(),
            net_timeout: default_fns::net_timeout(),
            output_file: None,
            charset: default_fns::charset(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from the resolved colour decision
    pub fn to_logger_config(&self, color: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color,
        }
    }

    /// Networking settings for the registry client
    pub fn to_networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            max_jobs: Some(self.jobs),
            timeout_seconds: self.net_timeout,
            trace_requests: self.log_level >= 4,
        }
    }

    /// Build request rooted at `root` with this config's bound, filter, and discipline
    pub fn to_build_request(&self, root: &PackageId) -> BuildRequest {
        BuildRequest::new(root.clone())
            .with_max_depth(self.max_depth)
            .with_filter(self.filter.as_deref())
            .with_discipline(self.discipline)
            .with_jobs(self.jobs)
    }

    /// Root package identifier
    pub fn root(&self) -> PackageId {
        PackageId::new(self.package.trim())
    }

    /// Rows shown by the `config` command
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let on_off = |flag: bool| if flag { "ON" } else { "OFF" }.to_string();
        vec![
            ("Package", self.package.clone()),
            ("Repository", self.repo.clone()),
            ("Test mode", on_off(self.test_mode)),
            ("ASCII tree", on_off(self.ascii_tree)),
            (
                "Max depth",
                self.max_depth
                    .map(|depth| depth.to_string())
                    .unwrap_or_else(|| "unbounded".to_string()),
            ),
            (
                "Filter",
                self.filter
                    .clone()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            ("Discipline", self.discipline.to_string()),
            ("Jobs", self.jobs.to_string()),
            (
                "Output file",
                self.output_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "not specified".to_string()),
            ),
        ]
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.filter.is_some() {
            self.filter = other.filter;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }

        // For primitive fields, take other if it's not the default
        if !other.package.is_empty() {
            self.package = other.package;
        }
        if other.repo != default_fns::repo() {
            self.repo = other.repo;
        }
        if other.test_mode {
            self.test_mode = true;
        }
        if other.ascii_tree {
            self.ascii_tree = true;
        }
        if other.jobs != default_fns::jobs() {
            self.jobs = other.jobs;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if other.discipline != default_fns::discipline() {
            self.discipline = other.discipline;
        }
        if other.charset != default_fns::charset() {
            self.charset = other.charset;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut reasons = Vec::new();

        if self.package.trim().is_empty() {
            reasons.push("package name cannot be empty".to_string());
        }
        if self.repo.trim().is_empty() {
            reasons.push("repository cannot be empty".to_string());
        }
        if self.max_depth == Some(0) {
            reasons.push("max depth must be a positive number".to_string());
        }
        if self.jobs == 0 {
            reasons.push("jobs must be a positive number".to_string());
        }
        if self.net_timeout == 0 {
            reasons.push("network timeout must be a positive number".to_string());
        }

        if self.test_mode && !self.repo.trim().is_empty() {
            let path = std::path::Path::new(&self.repo);
            if !path.exists() {
                reasons.push(format!("test file not found: {}", self.repo));
            } else if !path.is_file() {
                reasons.push(format!("path is not a file: {}", self.repo));
            }
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { reasons })
        }
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
