//! Configuration loading
//!
//! Coordinates loading configuration from every source into a validated
//! [`CliConfig`].

use crate::primitives::ConfigError;
use clap::Parser;
use std::ffi::OsString;
use tracing::debug;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl CliConfig {
    /// Load config from the process: defaults -> .env -> env vars -> CLI
    ///
    /// Help, version, and argument errors exit the process the way clap does.
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        let environment = EnvironmentConfig::load()?;
        Self::from_cli(Cli::parse(), environment)
    }

    /// Load from explicit arguments and environment (no .env files)
    pub fn load_from<I, T>(args: I, environment: EnvironmentConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| ConfigError::ParseError {
            value: "arguments".to_string(),
            reason: e.to_string(),
        })?;
        Self::from_cli(cli, environment)
    }

    fn from_cli(cli: Cli, environment: EnvironmentConfig) -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut config = AppConfig::default();

        // 2. Standard colour variables adjust the default intent
        config.color = environment.apply_color_config(config.color);

        // 3. CLI arguments (with DEPVIZ_* fallbacks) take precedence
        config = config.merge_with(cli.config);

        config.validate()?;
        debug!(package = %config.package, test_mode = config.test_mode, "Configuration loaded");

        Ok(Self {
            app_config: config,
            command: cli.command,
        })
    }
}

/// Load `.env.local` and `.env` when present
fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        if let Err(e) = dotenvy::from_filename(env_file) {
            // A missing file is fine, an unreadable one is not
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
