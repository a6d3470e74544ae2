//! Command execution handlers
//!
//! `execute_command` wires up logging, the display, and the lookup provider,
//! then hands off to [`run_command`], which builds the graph and renders the
//! requested report as text.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::display::Display;
use crate::graph::{
    BuildReport, CancellationFlag, DependencyGraph, GraphBuilder, GraphQuery, PackageId,
};
use crate::logger::Logger;
use crate::networking::NetworkingManager;
use crate::provider::{AnyLookup, DependencyLookup, ManifestRepository, NugetRegistry};
use crate::render::{self, ReportWriter};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Rendered report plus the build that produced it
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub text: String,
    /// `None` for commands that do not build a graph
    pub build: Option<BuildSummary>,
}

/// Counts and diagnostics from the build behind a report
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub packages: usize,
    pub edges: usize,
    pub report: BuildReport,
}

impl BuildSummary {
    /// The root's own lookup failed, so the report covers the root alone
    pub fn root_failed(&self) -> bool {
        self.report
            .failures
            .iter()
            .any(|failure| failure.package == self.report.root)
    }
}

/// Execute the selected command with fully loaded configuration
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let app = config.app_config;
    let color = app.color.enabled();

    if !Logger::is_initialized() {
        Logger::init(app.to_logger_config(color))?;
    }
    let display = match Display::global() {
        Some(display) => display,
        None => Display::init(color)?,
    };

    let command = config
        .command
        .unwrap_or_else(|| Commands::default_for(&app));
    debug!(?command, "Executing command");

    let provider = Arc::new(build_provider(&app)?);
    let cancellation = CancellationFlag::new();
    watch_interrupt(cancellation.clone());

    let output = run_command(&command, &app, provider, cancellation).await?;

    if let Some(build) = &output.build {
        report_build(display, build);
    }

    match &app.output_file {
        Some(path) => {
            ReportWriter::new(path).write(&output.text)?;
            display
                .status()
                .info(&format!("Wrote report to {}", path.display()));
        }
        None => println!("{}", output.text),
    }

    Ok(())
}

/// Build the graph the command needs and render its report
pub async fn run_command<P>(
    command: &Commands,
    config: &AppConfig,
    provider: Arc<P>,
    cancellation: CancellationFlag,
) -> Result<CommandOutput>
where
    P: DependencyLookup + 'static,
{
    if !command.requires_graph() {
        return Ok(CommandOutput {
            text: render::config_table("Configuration", &config.summary_rows()),
            build: None,
        });
    }

    let root = config.root();
    let mut request = config.to_build_request(&root);
    match command {
        Commands::Deps if !config.ascii_tree => request = request.with_max_depth(Some(1)),
        // Entries at the closure's edge still list their own dependencies
        Commands::Closure { depth } => {
            request = request.with_max_depth(Some(depth.saturating_add(1)))
        }
        _ => {}
    }

    let builder = GraphBuilder::shared(provider).with_cancellation(cancellation);
    let (graph, report) = builder.build(&request).await?;

    let text = render_report(command, config, &graph, &root);
    info!(command = ?command, "Report rendered");

    Ok(CommandOutput {
        text,
        build: Some(BuildSummary {
            packages: graph.package_count(),
            edges: graph.edge_count(),
            report,
        }),
    })
}

fn render_report(
    command: &Commands,
    config: &AppConfig,
    graph: &DependencyGraph,
    root: &PackageId,
) -> String {
    let query = GraphQuery::new(graph);

    match command {
        Commands::Deps if config.ascii_tree => render::ascii_tree(graph, root, config.charset),
        Commands::Deps => render::direct_dependencies(root, &graph.dependencies_of(root)),
        Commands::Tree => render::ascii_tree(graph, root, config.charset),
        Commands::Order => render::load_order_report(root, &query.load_order(root)),
        Commands::Reverse { target } => {
            let target = PackageId::new(target.trim());
            render::reverse_report(&target, &query.reverse_dependents(&target))
        }
        Commands::Cycles => render::cycle_report(root, &query.detect_cycles(root)),
        Commands::Plantuml => render::plantuml(graph, root),
        Commands::Closure { depth } => {
            render::closure_report(root, *depth, &query.bounded_closure(root, *depth))
        }
        Commands::Config => render::config_table("Configuration", &config.summary_rows()),
    }
}

/// Manifest file in test mode, the NuGet registry otherwise
pub fn build_provider(config: &AppConfig) -> Result<AnyLookup> {
    if config.test_mode {
        let manifest = ManifestRepository::load(Path::new(&config.repo))
            .with_context(|| format!("Failed to load manifest {}", config.repo))?;
        debug!(packages = manifest.len(), "Loaded manifest");
        return Ok(AnyLookup::Manifest(manifest));
    }

    let networking = NetworkingManager::new(config.to_networking_config())
        .context("Failed to initialize networking")?;
    Ok(AnyLookup::Nuget(NugetRegistry::with_base_url(
        Arc::new(networking),
        config.repo.clone(),
    )))
}

/// Cancel the build on Ctrl-C; the partial graph is still rendered
fn watch_interrupt(cancellation: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });
}

fn report_build(display: &Display, build: &BuildSummary) {
    let status = display.status();
    let report = &build.report;

    for failure in &report.failures {
        if failure.package == report.root {
            status.error(report.root.as_str(), &format!("lookup failed: {}", failure.error));
        } else {
            status.warning(&failure.error.to_string());
        }
    }
    if report.cancelled {
        status.warning("Build cancelled, output is partial");
    }
    if !report.truncated.is_empty() {
        status.subtle(&format!(
            "{} packages not expanded beyond the depth bound",
            report.truncated.len()
        ));
    }

    if !build.root_failed() {
        status.success(
            report.root.as_str(),
            &format!(
                "{} packages, {} edges, {} lookups",
                build.packages, build.edges, report.lookups
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
