//! E2E tests against a mocked NuGet flat container

use anyhow::Result;
use depviz_lib::application::{AppConfig, Commands, run_command};
use depviz_lib::graph::{BuildRequest, CancellationFlag, GraphBuilder};
use depviz_lib::networking::{NetworkingConfig, NetworkingManager};
use depviz_lib::provider::NugetRegistry;
use depviz_tests::{nuspec_xml, version_index};
use mockito::{Mock, ServerGuard};
use std::sync::Arc;

/// Serve `id` at `version` declaring `dependencies`
async fn publish(
    server: &mut ServerGuard,
    id: &str,
    version: &str,
    dependencies: &[&str],
) -> Vec<Mock> {
    let lower = id.to_lowercase();
    let index = server
        .mock("GET", format!("/{}/index.json", lower).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(version_index(&["0.9.0", version]))
        .create_async()
        .await;
    let nuspec = server
        .mock("GET", format!("/{}/{}/{}.nuspec", lower, version, lower).as_str())
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(nuspec_xml(id, version, dependencies))
        .create_async()
        .await;
    vec![index, nuspec]
}

fn registry(server: &ServerGuard, jobs: usize) -> Result<NugetRegistry> {
    let networking = NetworkingManager::new(NetworkingConfig {
        max_jobs: Some(jobs),
        timeout_seconds: 5,
        trace_requests: false,
    })?;
    Ok(NugetRegistry::with_base_url(Arc::new(networking), server.url()))
}

#[tokio::test]
async fn builds_graph_from_registry() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    mocks.extend(publish(&mut server, "Serilog.Sinks.File", "5.0.0", &["Serilog"]).await);
    mocks.extend(publish(&mut server, "Serilog", "3.1.1", &[]).await);

    let builder = GraphBuilder::new(registry(&server, 2)?);
    let (graph, report) = builder
        .build(&BuildRequest::new("Serilog.Sinks.File"))
        .await?;

    assert_eq!(graph.dependencies_of(&"serilog.sinks.file".into()), vec!["Serilog"]);
    assert!(graph.contains(&"Serilog".into()));
    assert!(report.is_complete());
    for mock in mocks {
        mock.assert_async().await;
    }
    Ok(())
}

#[tokio::test]
async fn missing_package_is_recorded_as_failure() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _published = publish(&mut server, "App", "1.0.0", &["Gone"]).await;
    let _gone = server
        .mock("GET", "/gone/index.json")
        .with_status(404)
        .create_async()
        .await;

    let builder = GraphBuilder::new(registry(&server, 1)?);
    let (graph, report) = builder.build(&BuildRequest::new("App")).await?;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].package, "Gone");
    assert!(graph.contains(&"Gone".into()));
    assert!(graph.dependencies_of(&"Gone".into()).is_empty());
    Ok(())
}

#[tokio::test]
async fn concurrent_tier_matches_sequential() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    mocks.extend(publish(&mut server, "Root", "1.0.0", &["Left", "Right", "Middle"]).await);
    mocks.extend(publish(&mut server, "Left", "1.0.0", &["Shared"]).await);
    mocks.extend(publish(&mut server, "Right", "1.0.0", &["Shared"]).await);
    mocks.extend(publish(&mut server, "Middle", "1.0.0", &[]).await);
    mocks.extend(publish(&mut server, "Shared", "1.0.0", &[]).await);

    let request = BuildRequest::new("Root");
    let (sequential, _) = GraphBuilder::new(registry(&server, 1)?)
        .build(&request)
        .await?;
    let (concurrent, _) = GraphBuilder::new(registry(&server, 4)?)
        .build(&request.clone().with_jobs(4))
        .await?;

    let keys: Vec<_> = sequential.all_packages().cloned().collect();
    assert_eq!(keys, concurrent.all_packages().cloned().collect::<Vec<_>>());
    for key in &keys {
        assert_eq!(sequential.dependencies_of(key), concurrent.dependencies_of(key));
    }
    Ok(())
}

#[tokio::test]
async fn deps_command_through_registry() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mocks = publish(&mut server, "App", "2.0.0", &["Core", "Logging"]).await;

    let config = AppConfig {
        package: "App".to_string(),
        repo: server.url(),
        ..AppConfig::default()
    };
    let provider = Arc::new(registry(&server, 1)?);
    let output = run_command(&Commands::Deps, &config, provider, CancellationFlag::new()).await?;

    assert_eq!(
        output.text,
        "Direct dependencies of 'App':\n  1. Core\n  2. Logging"
    );
    Ok(())
}
