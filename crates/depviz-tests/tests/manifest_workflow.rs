//! E2E tests driving commands against manifest files

use anyhow::Result;
use depviz_lib::application::{Commands, build_provider, run_command};
use depviz_lib::graph::{BuildRequest, CancellationFlag, Discipline, GraphBuilder, GraphQuery};
use depviz_lib::render::ReportWriter;
use depviz_tests::{REFERENCE_MANIFEST, TestEnvironment, reference_lookup};
use std::sync::Arc;

#[tokio::test]
async fn tree_from_reference_manifest() -> Result<()> {
    let env = TestEnvironment::new()?;
    let manifest = env.write_manifest("deps.txt", REFERENCE_MANIFEST)?;
    let config = env.manifest_config("A", &manifest);

    let provider = Arc::new(build_provider(&config)?);
    let output = run_command(&Commands::Tree, &config, provider, CancellationFlag::new()).await?;

    let expected = "\
A
├── B
│   ├── D
│   │   └── G
│   └── E
│       └── G
└── C
    └── F";
    assert_eq!(output.text, expected);
    Ok(())
}

#[tokio::test]
async fn load_order_from_manifest() -> Result<()> {
    let env = TestEnvironment::new()?;
    let manifest = env.write_manifest("deps.txt", REFERENCE_MANIFEST)?;
    let config = env.manifest_config("A", &manifest);

    let provider = Arc::new(build_provider(&config)?);
    let output = run_command(&Commands::Order, &config, provider, CancellationFlag::new()).await?;

    let packages: Vec<_> = output
        .text
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(". ").map(|(_, p)| p))
        .collect();
    assert_eq!(packages, vec!["G", "D", "E", "B", "F", "C", "A"]);
    Ok(())
}

#[tokio::test]
async fn manifest_cycle_is_reported_and_terminates() -> Result<()> {
    let env = TestEnvironment::new()?;
    let manifest = env.write_manifest("cycle.txt", "App: Core\nCore: Util\nUtil: App\n")?;
    let config = env.manifest_config("App", &manifest);

    let provider = Arc::new(build_provider(&config)?);
    let output = run_command(&Commands::Cycles, &config, provider, CancellationFlag::new()).await?;

    assert!(output.text.contains("App -> Core -> Util -> App"));
    let build = output.build.expect("cycles builds a graph");
    assert_eq!(build.report.lookups, 3);
    Ok(())
}

#[tokio::test]
async fn unknown_dependency_does_not_abort_the_build() -> Result<()> {
    let env = TestEnvironment::new()?;
    let manifest = env.write_manifest("partial.txt", "App: Core, Ghost\nCore:\n")?;
    let config = env.manifest_config("App", &manifest);

    let provider = Arc::new(build_provider(&config)?);
    let output = run_command(&Commands::Tree, &config, provider, CancellationFlag::new()).await?;

    assert!(output.text.contains("Ghost (lookup failed)"));
    let build = output.build.expect("tree builds a graph");
    assert_eq!(build.report.failures.len(), 1);
    assert_eq!(build.report.failures[0].package, "Ghost");
    Ok(())
}

#[tokio::test]
async fn disciplines_store_identical_edges() -> Result<()> {
    let lookup = Arc::new(reference_lookup());
    let builder = GraphBuilder::shared(Arc::clone(&lookup));

    for bound in [Some(1), Some(2), Some(3), None] {
        let bfs = BuildRequest::new("A").with_max_depth(bound);
        let dfs = bfs.clone().with_discipline(Discipline::DepthFirst);

        let (bfs_graph, _) = builder.build(&bfs).await?;
        let (dfs_graph, _) = builder.build(&dfs).await?;

        let mut bfs_keys: Vec<_> = bfs_graph.all_packages().cloned().collect();
        let mut dfs_keys: Vec<_> = dfs_graph.all_packages().cloned().collect();
        bfs_keys.sort();
        dfs_keys.sort();
        assert_eq!(bfs_keys, dfs_keys, "bound {:?}", bound);

        for key in &bfs_keys {
            assert_eq!(
                bfs_graph.dependencies_of(key),
                dfs_graph.dependencies_of(key),
                "bound {:?}, package {}",
                bound,
                key
            );
        }
    }
    Ok(())
}

#[tokio::test]
async fn closure_and_transitive_agree() -> Result<()> {
    let builder = GraphBuilder::new(reference_lookup());
    let (graph, _) = builder.build(&BuildRequest::new("A")).await?;
    let query = GraphQuery::new(&graph);
    let root = "A".into();

    let closure = query.bounded_closure(&root, 2);
    let mut from_closure: Vec<_> = closure.packages().filter(|p| **p != root).cloned().collect();
    let mut transitive = query.transitive_dependencies(&root, Some(2), Discipline::BreadthFirst);
    from_closure.sort();
    transitive.sort();

    assert_eq!(from_closure, transitive);
    Ok(())
}

#[tokio::test]
async fn report_written_to_nested_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    let manifest = env.write_manifest("deps.txt", REFERENCE_MANIFEST)?;
    let config = env.manifest_config("A", &manifest);
    let target = env.output_path("reports/nested/a.puml");

    let provider = Arc::new(build_provider(&config)?);
    let output =
        run_command(&Commands::Plantuml, &config, provider, CancellationFlag::new()).await?;
    ReportWriter::new(&target).write(&output.text)?;

    let written = std::fs::read_to_string(&target)?;
    assert!(written.starts_with("@startuml\n"));
    assert!(written.ends_with("@enduml\n"));
    Ok(())
}
