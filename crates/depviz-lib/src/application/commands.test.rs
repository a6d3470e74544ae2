use super::*;
use crate::provider::StaticLookup;
use std::io::Write as _;

fn reference_lookup() -> Arc<StaticLookup> {
    Arc::new(StaticLookup::from_pairs([
        ("A", &["B", "C"][..]),
        ("B", &["D", "E"][..]),
        ("C", &["F"][..]),
        ("D", &["G"][..]),
        ("E", &["G"][..]),
        ("F", &[][..]),
        ("G", &[][..]),
    ]))
}

fn config_for(package: &str) -> AppConfig {
    AppConfig {
        package: package.to_string(),
        max_depth: Some(10),
        jobs: 1,
        ..AppConfig::default()
    }
}

async fn run(command: Commands, config: &AppConfig) -> CommandOutput {
    run_command(&command, config, reference_lookup(), CancellationFlag::new())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_deps_only_looks_up_the_root() {
    let lookup = reference_lookup();
    let output = run_command(
        &Commands::Deps,
        &config_for("A"),
        Arc::clone(&lookup),
        CancellationFlag::new(),
    )
    .await
    .unwrap();

    assert_eq!(output.text, "Direct dependencies of 'A':\n  1. B\n  2. C");
    assert_eq!(lookup.calls().await, vec!["A"]);
}

#[tokio::test]
async fn test_deps_with_ascii_tree_prints_tree() {
    let config = AppConfig {
        ascii_tree: true,
        ..config_for("A")
    };
    let output = run(Commands::Deps, &config).await;

    assert!(output.text.starts_with("A\n├── B"));
    assert!(output.text.ends_with("└── C\n    └── F"));
}

#[tokio::test]
async fn test_tree_marks_depth_truncation() {
    let config = AppConfig {
        max_depth: Some(3),
        ..config_for("A")
    };
    let output = run(Commands::Tree, &config).await;
    let build = output.build.unwrap();

    assert!(output.text.contains("└── G (...)"));
    assert_eq!(build.report.truncated, vec!["G"]);
}

#[tokio::test]
async fn test_order_lists_dependencies_first() {
    let output = run(Commands::Order, &config_for("A")).await;
    let lines: Vec<_> = output.text.lines().skip(1).collect();

    assert_eq!(
        lines,
        vec![
            "  1. G", "  2. D", "  3. E", "  4. B", "  5. F", "  6. C", "  7. A"
        ]
    );
}

#[tokio::test]
async fn test_reverse_lists_direct_dependents() {
    let command = Commands::Reverse {
        target: "g".to_string(),
    };
    let output = run(command, &config_for("A")).await;

    assert!(output.text.ends_with("  1. D\n  2. E"));
}

#[tokio::test]
async fn test_cycles_on_acyclic_graph() {
    let output = run(Commands::Cycles, &config_for("A")).await;
    assert_eq!(output.text, "No cycles reachable from 'A'");
}

#[tokio::test]
async fn test_cycles_reported() {
    let lookup = Arc::new(StaticLookup::from_pairs([
        ("A", &["B"][..]),
        ("B", &["C"][..]),
        ("C", &["A"][..]),
    ]));
    let output = run_command(
        &Commands::Cycles,
        &config_for("A"),
        lookup,
        CancellationFlag::new(),
    )
    .await
    .unwrap();

    assert!(output.text.contains("A -> B -> C -> A"));
}

#[tokio::test]
async fn test_closure_lists_entries_with_depth() {
    let output = run(Commands::Closure { depth: 1 }, &config_for("A")).await;

    assert_eq!(
        output.text,
        "Closure of 'A' within depth 1:\n  [0] A: B, C\n  [1] B: D, E\n  [1] C: F"
    );
}

#[tokio::test]
async fn test_plantuml_wraps_diagram() {
    let output = run(Commands::Plantuml, &config_for("A")).await;

    assert!(output.text.starts_with("@startuml"));
    assert!(output.text.contains("\"D\" --> \"G\""));
}

#[tokio::test]
async fn test_config_does_not_build() {
    let lookup = reference_lookup();
    let output = run_command(
        &Commands::Config,
        &config_for("A"),
        Arc::clone(&lookup),
        CancellationFlag::new(),
    )
    .await
    .unwrap();

    assert!(output.build.is_none());
    assert!(output.text.contains("Package"));
    assert!(lookup.calls().await.is_empty());
}

#[tokio::test]
async fn test_unresolvable_root_still_renders_report() {
    let output = run(Commands::Deps, &config_for("Missing")).await;
    let build = output.build.unwrap();

    assert_eq!(output.text, "Direct dependencies of 'Missing':\n  (no dependencies)");
    assert!(build.root_failed());
    assert_eq!(build.packages, 1);
    assert_eq!(build.report.failures.len(), 1);
}

#[tokio::test]
async fn test_unresolvable_root_is_marked_in_tree() {
    let output = run(Commands::Tree, &config_for("Missing")).await;

    assert_eq!(output.text, "Missing (lookup failed)");
    assert!(output.build.unwrap().root_failed());
}

#[tokio::test]
async fn test_resolved_root_is_not_flagged() {
    let output = run(Commands::Deps, &config_for("A")).await;
    assert!(!output.build.unwrap().root_failed());
}

#[tokio::test]
async fn test_filter_applies_to_reports() {
    let config = AppConfig {
        filter: Some("c".to_string()),
        ..config_for("A")
    };
    let output = run(Commands::Deps, &config).await;

    assert_eq!(output.text, "Direct dependencies of 'A':\n  1. B");
}

#[tokio::test]
async fn test_build_summary_counts() {
    let output = run(Commands::Tree, &config_for("A")).await;
    let build = output.build.unwrap();

    assert_eq!(build.packages, 7);
    assert_eq!(build.edges, 7);
    assert_eq!(build.report.lookups, 7);
    assert!(build.report.is_complete());
}

#[test]
fn test_test_mode_provider_reads_manifest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "A: B").unwrap();
    let config = AppConfig {
        test_mode: true,
        repo: file.path().display().to_string(),
        ..config_for("A")
    };

    assert!(matches!(
        build_provider(&config).unwrap(),
        AnyLookup::Manifest(_)
    ));
}

#[test]
fn test_missing_manifest_is_an_error() {
    let config = AppConfig {
        test_mode: true,
        repo: "/no/such/manifest.txt".to_string(),
        ..config_for("A")
    };

    let err = build_provider(&config).err().unwrap();
    assert!(err.to_string().contains("Failed to load manifest"));
}
