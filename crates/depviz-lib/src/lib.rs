//! # depviz Library
//!
//! Package dependency graphs: build them through a lookup provider, query
//! them, and render them as text.
//!
//! ## Core Modules
//!
//! - [`graph`] - Graph storage, the builder, and the query engine
//! - [`provider`] - Dependency lookups (NuGet registry, manifest files)
//! - [`render`] - Trees, lists, and PlantUML output
//! - [`networking`] - Async HTTP client with concurrency management
//! - [`logger`] - Structured logging with progress tracking
//! - [`display`] - User-facing status lines
//! - [`primitives`] - Foundation types and errors
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! use depviz_lib::graph::{BuildRequest, GraphBuilder, GraphQuery};
//! use depviz_lib::provider::ManifestRepository;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let manifest = ManifestRepository::parse("App: Core\nCore:")?;
//! let builder = GraphBuilder::new(manifest);
//! let (graph, _report) = builder.build(&BuildRequest::new("App")).await?;
//! let order = GraphQuery::new(&graph).load_order(&"App".into());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod display;
pub mod graph;
pub mod logger;
pub mod networking;
pub mod primitives;
pub mod provider;
pub mod render;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command, run_command};
pub use graph::{BuildRequest, DependencyGraph, Discipline, GraphBuilder, GraphQuery, PackageId};
pub use logger::Logger;
pub use networking::{NetworkingConfig, NetworkingManager};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use provider::{DependencyLookup, LookupError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
