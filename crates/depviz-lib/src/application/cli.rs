use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// depviz CLI - package dependency graphs
#[derive(Debug, Clone, Parser)]
#[command(name = "depviz")]
#[command(about = "Build and query package dependency graphs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// depviz commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from all sources plus the selected command
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available depviz commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Print the effective configuration
    Config,

    /// List the root's direct dependencies (the full tree with --ascii-tree)
    Deps,

    /// Print the dependency tree
    Tree,

    /// Print a load order, dependencies before dependents
    Order,

    /// List packages that depend directly on a target
    Reverse {
        /// Package whose dependents to list
        #[arg(help = "Package whose dependents to list")]
        target: String,
    },

    /// Report dependency cycles reachable from the root
    Cycles,

    /// Emit a PlantUML component diagram
    Plantuml,

    /// Packages within a number of hops from the root
    Closure {
        /// Hop limit
        #[arg(help = "Maximum number of edges from the root")]
        depth: usize,
    },
}

impl Commands {
    /// Command used when none is given on the command line
    pub fn default_for(config: &AppConfig) -> Self {
        if config.ascii_tree {
            Commands::Tree
        } else {
            Commands::Deps
        }
    }

    /// Whether the command needs a built graph
    pub fn requires_graph(&self) -> bool {
        !matches!(self, Commands::Config)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
