// Tests for graph construction

use super::*;
use crate::graph::package_ids;
use crate::provider::StaticLookup;
use std::sync::atomic::AtomicUsize;

// ============================================================================
// Test Utilities
// ============================================================================

/// {A:[B,C], B:[D,E], C:[F], D:[G], E:[G], F:[], G:[]}
fn reference_lookup() -> StaticLookup {
    StaticLookup::from_pairs([
        ("A", &["B", "C"][..]),
        ("B", &["D", "E"][..]),
        ("C", &["F"][..]),
        ("D", &["G"][..]),
        ("E", &["G"][..]),
        ("F", &[][..]),
        ("G", &[][..]),
    ])
}

/// Keys with their lists, sorted by key, for order-independent comparison
fn edge_set(graph: &DependencyGraph) -> Vec<(String, Vec<String>)> {
    let mut edges: Vec<_> = graph
        .all_packages()
        .map(|p| {
            let deps = graph
                .dependencies_of(p)
                .iter()
                .map(|d| d.key().to_string())
                .collect();
            (p.key().to_string(), deps)
        })
        .collect();
    edges.sort();
    edges
}

fn names(ids: &[PackageId]) -> Vec<&str> {
    ids.iter().map(PackageId::as_str).collect()
}

async fn build_with(
    lookup: StaticLookup,
    request: BuildRequest,
) -> (DependencyGraph, BuildReport, Vec<PackageId>) {
    let lookup = Arc::new(lookup);
    let builder = GraphBuilder::shared(Arc::clone(&lookup));
    let (graph, report) = builder.build(&request).await.unwrap();
    let calls = lookup.calls().await;
    (graph, report, calls)
}

/// Provider that trips a cancellation flag after a number of lookups
struct CancelAfter {
    inner: StaticLookup,
    flag: CancellationFlag,
    after: usize,
    seen: AtomicUsize,
}

impl DependencyLookup for CancelAfter {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 >= self.after {
            self.flag.cancel();
        }
        self.inner.lookup(package).await
    }
}

// ============================================================================
// Request validation
// ============================================================================

#[test]
fn test_request_defaults() {
    let request = BuildRequest::new("A");
    assert_eq!(request.max_depth, None);
    assert_eq!(request.filter, None);
    assert_eq!(request.discipline, Discipline::BreadthFirst);
    assert_eq!(request.jobs, 1);
    assert!(request.validate().is_ok());
}

#[tokio::test]
async fn test_zero_depth_bound_rejected_before_lookup() {
    let lookup = Arc::new(reference_lookup());
    let builder = GraphBuilder::shared(Arc::clone(&lookup));

    let result = builder
        .build(&BuildRequest::new("A").with_max_depth(Some(0)))
        .await;

    assert!(matches!(result, Err(BuildError::InvalidBound { max_depth: 0 })));
    assert!(lookup.calls().await.is_empty());
}

#[tokio::test]
async fn test_empty_root_rejected() {
    let builder = GraphBuilder::new(reference_lookup());
    let result = builder.build(&BuildRequest::new("   ")).await;
    assert!(matches!(result, Err(BuildError::EmptyRoot)));
}

#[test]
fn test_zero_jobs_rejected() {
    let request = BuildRequest::new("A").with_jobs(0);
    assert_eq!(request.validate(), Err(BuildError::InvalidJobs { jobs: 0 }));
}

#[test]
fn test_discipline_parsing_and_display() {
    assert_eq!("dfs".parse::<Discipline>().unwrap(), Discipline::DepthFirst);
    assert_eq!(
        "Breadth-First".parse::<Discipline>().unwrap(),
        Discipline::BreadthFirst
    );
    assert!("sideways".parse::<Discipline>().is_err());
    assert_eq!(Discipline::DepthFirst.to_string(), "dfs");
}

// ============================================================================
// Breadth-first
// ============================================================================

#[tokio::test]
async fn test_bfs_builds_reference_graph() {
    let (graph, report, calls) = build_with(reference_lookup(), BuildRequest::new("A")).await;

    assert_eq!(graph.package_count(), 7);
    assert_eq!(graph.dependencies_of(&PackageId::new("A")), vec!["B", "C"]);
    assert_eq!(graph.dependencies_of(&PackageId::new("D")), vec!["G"]);
    assert!(graph.contains(&PackageId::new("G")));
    assert_eq!(names(&calls), vec!["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(report.lookups, 7);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_bfs_records_diamond_as_revisit() {
    let (_, report, _) = build_with(reference_lookup(), BuildRequest::new("A")).await;

    // G is reached from both D and E; that is a revisit, not a cycle
    assert_eq!(names(&report.revisits), vec!["G"]);
}

#[tokio::test]
async fn test_bfs_cycle_terminates_and_records_revisit() {
    let lookup = StaticLookup::new()
        .with_dependencies("A", ["B"])
        .with_dependencies("B", ["A"]);

    let (graph, report, calls) = build_with(lookup, BuildRequest::new("A")).await;

    assert_eq!(graph.dependencies_of(&PackageId::new("B")), vec!["A"]);
    assert_eq!(names(&report.revisits), vec!["A"]);
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn test_self_dependency_is_stored_once() {
    let lookup = StaticLookup::new().with_dependencies("A", ["A"]);

    let (graph, report, calls) = build_with(lookup, BuildRequest::new("A")).await;

    assert_eq!(graph.dependencies_of(&PackageId::new("A")), vec!["A"]);
    assert_eq!(names(&report.revisits), vec!["A"]);
    assert_eq!(calls.len(), 1);
}

// ============================================================================
// Depth-first
// ============================================================================

#[tokio::test]
async fn test_dfs_lookup_order_follows_children_first() {
    let request = BuildRequest::new("A").with_discipline(Discipline::DepthFirst);
    let (_, report, calls) = build_with(reference_lookup(), request).await;

    assert_eq!(names(&calls), vec!["A", "B", "D", "G", "E", "C", "F"]);
    // The G diamond is not a back edge
    assert!(report.revisits.is_empty());
    assert_eq!(report.discipline, Discipline::DepthFirst);
}

#[tokio::test]
async fn test_dfs_records_back_edge() {
    let lookup = StaticLookup::new()
        .with_dependencies("A", ["B"])
        .with_dependencies("B", ["C"])
        .with_dependencies("C", ["A"]);
    let request = BuildRequest::new("A").with_discipline(Discipline::DepthFirst);

    let (graph, report, _) = build_with(lookup, request).await;

    assert_eq!(graph.package_count(), 3);
    assert_eq!(names(&report.revisits), vec!["A"]);
}

#[tokio::test]
async fn test_disciplines_store_same_edges() {
    let bfs = build_with(reference_lookup(), BuildRequest::new("A")).await;
    let dfs = build_with(
        reference_lookup(),
        BuildRequest::new("A").with_discipline(Discipline::DepthFirst),
    )
    .await;

    assert_eq!(edge_set(&bfs.0), edge_set(&dfs.0));
}

#[tokio::test]
async fn test_disciplines_agree_when_dfs_first_reaches_deep() {
    // DFS meets D at depth 2 through B before the direct edge at depth 1
    let lookup = || {
        StaticLookup::new()
            .with_dependencies("A", ["B", "D"])
            .with_dependencies("B", ["D"])
            .with_dependencies("D", ["E"])
            .with_dependencies("E", ["F"])
            .with_dependencies("F", Vec::<&str>::new())
    };

    for max_depth in [Some(2), Some(3), None] {
        let (bfs, bfs_report, _) =
            build_with(lookup(), BuildRequest::new("A").with_max_depth(max_depth)).await;
        let (dfs, dfs_report, dfs_calls) = build_with(
            lookup(),
            BuildRequest::new("A")
                .with_max_depth(max_depth)
                .with_discipline(Discipline::DepthFirst),
        )
        .await;

        assert_eq!(edge_set(&bfs), edge_set(&dfs), "max_depth {:?}", max_depth);
        assert_eq!(bfs_report.truncated, dfs_report.truncated);

        // Re-expansion at a shallower depth reuses stored edges
        let mut unique = dfs_calls.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), dfs_calls.len());
    }
}

// ============================================================================
// Depth bound
// ============================================================================

#[tokio::test]
async fn test_depth_one_expands_only_root() {
    let request = BuildRequest::new("A").with_max_depth(Some(1));
    let (graph, report, calls) = build_with(reference_lookup(), request).await;

    assert_eq!(names(&calls), vec!["A"]);
    assert_eq!(graph.package_count(), 1);
    assert_eq!(graph.dependencies_of(&PackageId::new("A")), vec!["B", "C"]);
    assert!(!graph.contains(&PackageId::new("B")));
    assert_eq!(
        graph.status(&PackageId::new("B")),
        Some(&NodeStatus::Truncated)
    );
    assert_eq!(names(&report.truncated), vec!["B", "C"]);
}

#[tokio::test]
async fn test_depth_two_truncates_third_tier() {
    let request = BuildRequest::new("A").with_max_depth(Some(2));
    let (graph, report, _) = build_with(reference_lookup(), request).await;

    let keys: Vec<_> = graph.all_packages().map(|p| p.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(names(&report.truncated), vec!["D", "E", "F"]);
}

// ============================================================================
// Filter and failures
// ============================================================================

#[tokio::test]
async fn test_filter_excludes_matching_dependencies() {
    let lookup = StaticLookup::new()
        .with_dependencies("P", ["Foo.Bar", "Baz", "FooExtra"])
        .with_dependencies("Baz", Vec::<&str>::new());
    let request = BuildRequest::new("P").with_filter(Some("Foo"));

    let (graph, _, calls) = build_with(lookup, request).await;

    assert_eq!(graph.dependencies_of(&PackageId::new("P")), vec!["Baz"]);
    assert_eq!(names(&calls), vec!["P", "Baz"]);
    assert!(!graph.is_known(&PackageId::new("Foo.Bar")));
}

#[tokio::test]
async fn test_filter_never_applies_to_root() {
    let lookup = StaticLookup::new().with_dependencies("FooRoot", ["Dep"]);
    let request = BuildRequest::new("FooRoot").with_filter(Some("foo"));

    let (graph, _, _) = build_with(lookup, request).await;
    assert!(graph.contains(&PackageId::new("FooRoot")));
}

#[tokio::test]
async fn test_lookup_failure_degrades_to_leaf() {
    let lookup = StaticLookup::new()
        .with_dependencies("A", ["X", "B"])
        .with_failure("X", "registry unreachable")
        .with_dependencies("B", ["C"])
        .with_dependencies("C", Vec::<&str>::new());

    let (graph, report, _) = build_with(lookup, BuildRequest::new("A")).await;

    assert!(graph.contains(&PackageId::new("X")));
    assert!(graph.dependencies_of(&PackageId::new("X")).is_empty());
    assert!(matches!(
        graph.status(&PackageId::new("X")),
        Some(NodeStatus::LookupFailed { .. })
    ));
    assert!(graph.contains(&PackageId::new("C")));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].package, PackageId::new("X"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_unknown_package_is_recorded_as_failure() {
    let lookup = StaticLookup::new().with_dependencies("A", ["Ghost"]);

    let (graph, report, _) = build_with(lookup, BuildRequest::new("A")).await;

    assert!(graph.contains(&PackageId::new("Ghost")));
    assert!(matches!(
        report.failures[0].error,
        LookupError::NotFound { .. }
    ));
}

// ============================================================================
// Concurrency, cancellation, accumulation
// ============================================================================

#[tokio::test]
async fn test_concurrent_tiers_match_sequential_build() {
    let (sequential, seq_report, _) =
        build_with(reference_lookup(), BuildRequest::new("A")).await;
    let (concurrent, con_report, calls) =
        build_with(reference_lookup(), BuildRequest::new("A").with_jobs(4)).await;

    assert_eq!(edge_set(&sequential), edge_set(&concurrent));
    let seq_keys: Vec<_> = sequential.all_packages().collect();
    let con_keys: Vec<_> = concurrent.all_packages().collect();
    assert_eq!(seq_keys, con_keys);
    assert_eq!(con_report.lookups, 7);
    assert_eq!(calls.len(), 7);
    assert_eq!(seq_report.revisits, con_report.revisits);
}

#[tokio::test]
async fn test_cancelled_before_start_returns_empty_graph() {
    let flag = CancellationFlag::new();
    flag.cancel();
    let builder = GraphBuilder::new(reference_lookup()).with_cancellation(flag);

    let (graph, report) = builder.build(&BuildRequest::new("A")).await.unwrap();

    assert!(graph.is_empty());
    assert!(report.cancelled);
    assert_eq!(report.lookups, 0);
}

#[tokio::test]
async fn test_cancellation_mid_build_keeps_partial_graph() {
    let flag = CancellationFlag::new();
    let provider = CancelAfter {
        inner: reference_lookup(),
        flag: flag.clone(),
        after: 2,
        seen: AtomicUsize::new(0),
    };
    let builder = GraphBuilder::new(provider).with_cancellation(flag);

    let (graph, report) = builder.build(&BuildRequest::new("A")).await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.lookups, 2);
    let keys: Vec<_> = graph.all_packages().map(|p| p.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);
}

#[tokio::test]
async fn test_dfs_cancellation_stops_walk() {
    let flag = CancellationFlag::new();
    let provider = CancelAfter {
        inner: reference_lookup(),
        flag: flag.clone(),
        after: 3,
        seen: AtomicUsize::new(0),
    };
    let builder = GraphBuilder::new(provider).with_cancellation(flag);
    let request = BuildRequest::new("A").with_discipline(Discipline::DepthFirst);

    let (graph, report) = builder.build(&request).await.unwrap();

    assert!(report.cancelled);
    let keys: Vec<_> = graph.all_packages().map(|p| p.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "D"]);
}

#[tokio::test]
async fn test_build_into_reuses_stored_packages() {
    let lookup = Arc::new(reference_lookup().with_dependencies("X", ["G", "Y"]));
    let builder = GraphBuilder::shared(Arc::clone(&lookup));

    let mut graph = DependencyGraph::new();
    builder
        .build_into(&mut graph, &BuildRequest::new("A"))
        .await
        .unwrap();
    let first_calls = lookup.calls().await.len();

    let report = builder
        .build_into(&mut graph, &BuildRequest::new("X"))
        .await
        .unwrap();

    let calls = lookup.calls().await;
    assert_eq!(names(&calls[first_calls..]), vec!["X", "Y"]);
    assert_eq!(report.lookups, 2);
    assert_eq!(report.failures.len(), 1); // Y is unscripted
    assert_eq!(graph.reverse_dependents_of(&PackageId::new("G")), vec!["D", "E", "X"]);
    assert_eq!(graph.dependencies_of(&PackageId::new("A")), package_ids(["B", "C"]));
}
