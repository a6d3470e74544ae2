// Tests for graph queries

use super::*;
use crate::graph::package_ids;

fn id(name: &str) -> PackageId {
    PackageId::new(name)
}

fn graph_from(pairs: &[(&str, &[&str])]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (package, deps) in pairs {
        graph.add_edges(&id(package), &package_ids(deps.iter()));
    }
    graph
}

/// {A:[B,C], B:[D,E], C:[F], D:[G], E:[G], F:[], G:[]}
fn reference_graph() -> DependencyGraph {
    graph_from(&[
        ("A", &["B", "C"]),
        ("B", &["D", "E"]),
        ("C", &["F"]),
        ("D", &["G"]),
        ("E", &["G"]),
        ("F", &[]),
        ("G", &[]),
    ])
}

fn position(order: &[PackageId], name: &str) -> usize {
    order
        .iter()
        .position(|p| *p == name)
        .unwrap_or_else(|| panic!("{} missing from {:?}", name, order))
}

// ============================================================================
// Bounded closure
// ============================================================================

#[test]
fn test_closure_depth_zero_is_root_only() {
    let graph = reference_graph();
    let closure = GraphQuery::new(&graph).bounded_closure(&id("A"), 0);

    assert_eq!(closure.len(), 1);
    assert_eq!(closure.get(&id("A")).unwrap(), &package_ids(["B", "C"])[..]);
}

#[test]
fn test_closure_depth_one_matches_worked_example() {
    let graph = reference_graph();
    let closure = GraphQuery::new(&graph).bounded_closure(&id("A"), 1);

    let packages: Vec<_> = closure.packages().map(|p| p.as_str()).collect();
    assert_eq!(packages, vec!["A", "B", "C"]);
    assert_eq!(closure.get(&id("B")).unwrap(), &package_ids(["D", "E"])[..]);
    assert_eq!(closure.get(&id("C")).unwrap(), &package_ids(["F"])[..]);
    assert!(!closure.contains(&id("D")));
    assert_eq!(closure.depth_of(&id("C")), Some(1));
}

#[test]
fn test_closure_first_depth_wins() {
    let graph = graph_from(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])]);
    let closure = GraphQuery::new(&graph).bounded_closure(&id("A"), 5);

    assert_eq!(closure.depth_of(&id("C")), Some(1));
    assert_eq!(closure.len(), 3);
}

#[test]
fn test_closure_of_absent_root_is_empty_list() {
    let graph = reference_graph();
    let closure = GraphQuery::new(&graph).bounded_closure(&id("Nope"), 3);

    assert_eq!(closure.len(), 1);
    assert!(closure.get(&id("Nope")).unwrap().is_empty());
}

// ============================================================================
// Transitive dependencies
// ============================================================================

#[test]
fn test_transitive_dependencies_both_disciplines_same_set() {
    let graph = reference_graph();
    let query = GraphQuery::new(&graph);

    for bound in [Some(1), Some(2), None] {
        let mut bfs = query.transitive_dependencies(&id("A"), bound, Discipline::BreadthFirst);
        let mut dfs = query.transitive_dependencies(&id("A"), bound, Discipline::DepthFirst);
        bfs.sort();
        dfs.sort();
        assert_eq!(bfs, dfs, "bound {:?}", bound);
    }
}

#[test]
fn test_transitive_dependencies_orders() {
    let graph = reference_graph();
    let query = GraphQuery::new(&graph);

    let bfs = query.transitive_dependencies(&id("A"), None, Discipline::BreadthFirst);
    assert_eq!(bfs, vec!["B", "C", "D", "E", "F", "G"]);

    let dfs = query.transitive_dependencies(&id("A"), None, Discipline::DepthFirst);
    assert_eq!(dfs, vec!["B", "D", "G", "E", "C", "F"]);
}

#[test]
fn test_dfs_reachability_respects_shorter_path() {
    // DFS meets E at depth 2 through B before the direct edge at depth 1
    let graph = graph_from(&[
        ("A", &["B", "E"]),
        ("B", &["E"]),
        ("E", &["F"]),
        ("F", &["G"]),
        ("G", &[]),
    ]);
    let query = GraphQuery::new(&graph);

    let mut dfs = query.transitive_dependencies(&id("A"), Some(2), Discipline::DepthFirst);
    dfs.sort();
    assert_eq!(dfs, vec!["B", "E", "F"]);
}

// ============================================================================
// Load order
// ============================================================================

#[test]
fn test_load_order_worked_example() {
    let graph = reference_graph();
    let order = GraphQuery::new(&graph).load_order(&id("A"));

    assert_eq!(order, vec!["G", "D", "E", "B", "F", "C", "A"]);
    assert!(position(&order, "G") < position(&order, "D"));
    assert!(position(&order, "G") < position(&order, "E"));
}

#[test]
fn test_load_order_dependencies_first_each_once() {
    let graph = graph_from(&[
        ("App", &["Web", "Data", "Log"]),
        ("Web", &["Http", "Log"]),
        ("Data", &["Log", "Sql"]),
        ("Http", &["Log"]),
        ("Log", &[]),
        ("Sql", &[]),
    ]);
    let order = GraphQuery::new(&graph).load_order(&id("App"));

    assert_eq!(order.len(), 6);
    for package in graph.all_packages() {
        for dep in graph.dependencies_of(package) {
            assert!(
                position(&order, dep.as_str()) < position(&order, package.as_str()),
                "{} must load before {}",
                dep,
                package
            );
        }
    }
}

#[test]
fn test_load_order_includes_unexpanded_leaves() {
    let graph = graph_from(&[("A", &["B"])]);
    let order = GraphQuery::new(&graph).load_order(&id("A"));
    assert_eq!(order, vec!["B", "A"]);
}

#[test]
fn test_load_order_terminates_on_cycle() {
    let graph = graph_from(&[("A", &["B"]), ("B", &["A"])]);
    let order = GraphQuery::new(&graph).load_order(&id("A"));
    assert_eq!(order, vec!["B", "A"]);
}

// ============================================================================
// Reverse dependents
// ============================================================================

#[test]
fn test_reverse_dependents_in_scan_order() {
    let graph = reference_graph();
    let query = GraphQuery::new(&graph);
    assert_eq!(query.reverse_dependents(&id("G")), vec!["D", "E"]);
    assert!(query.reverse_dependents(&id("A")).is_empty());
}

// ============================================================================
// Cycle detection
// ============================================================================

#[test]
fn test_two_node_cycle_detected() {
    let graph = graph_from(&[("A", &["B"]), ("B", &["A"])]);
    let cycles = GraphQuery::new(&graph).detect_cycles(&id("A"));

    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains(&id("A")));
    assert!(cycles[0].contains(&id("B")));
    assert_eq!(cycles[0].to_string(), "A -> B -> A");
    assert_eq!(cycles[0].len(), 2);
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let graph = graph_from(&[
        ("A", &["B", "C"]),
        ("B", &["D"]),
        ("C", &["D"]),
        ("D", &[]),
    ]);
    let query = GraphQuery::new(&graph);

    assert!(query.detect_cycles(&id("A")).is_empty());
    assert!(!query.has_cycle_from(&id("A")));
}

#[test]
fn test_cycle_path_starts_at_repeated_package() {
    let graph = graph_from(&[
        ("Root", &["A"]),
        ("A", &["B"]),
        ("B", &["C"]),
        ("C", &["A"]),
    ]);
    let cycles = GraphQuery::new(&graph).detect_cycles(&id("Root"));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].members, vec!["A", "B", "C", "A"]);
    assert!(!cycles[0].contains(&id("Root")));
}

#[test]
fn test_self_loop_is_a_cycle() {
    let graph = graph_from(&[("A", &["A"])]);
    let cycles = GraphQuery::new(&graph).detect_cycles(&id("A"));

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].to_string(), "A -> A");
}

#[test]
fn test_cycle_not_reachable_from_root_is_ignored() {
    let graph = graph_from(&[("A", &["B"]), ("B", &[]), ("X", &["Y"]), ("Y", &["X"])]);
    let query = GraphQuery::new(&graph);

    assert!(!query.has_cycle_from(&id("A")));
    assert!(query.has_cycle_from(&id("X")));
    assert!(graph.has_cycles());
}
