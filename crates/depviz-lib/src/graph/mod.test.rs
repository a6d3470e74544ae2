// Tests for dependency graph storage

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(name: &str) -> PackageId {
    PackageId::new(name)
}

/// Build the reference graph {A:[B,C], B:[D,E], C:[F], D:[G], E:[G], F:[], G:[]}
fn reference_graph() -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B", "C"]));
    graph.add_edges(&id("B"), &package_ids(["D", "E"]));
    graph.add_edges(&id("C"), &package_ids(["F"]));
    graph.add_edges(&id("D"), &package_ids(["G"]));
    graph.add_edges(&id("E"), &package_ids(["G"]));
    graph.add_edges(&id("F"), &[]);
    graph.add_edges(&id("G"), &[]);
    graph
}

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = DependencyGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.package_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.all_packages().count(), 0);
}

#[test]
fn test_add_edges_preserves_order() {
    let mut graph = DependencyGraph::new();
    let deps = package_ids(["Zeta", "Alpha", "Mid"]);

    assert_eq!(graph.add_edges(&id("root"), &deps), EdgeInsert::Inserted);
    assert_eq!(graph.dependencies_of(&id("root")), deps);
}

#[test]
fn test_add_edges_keeps_duplicates_within_one_list() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B", "C", "B"]));

    assert_eq!(graph.dependencies_of(&id("A")), vec!["B", "C", "B"]);
}

#[test]
fn test_repeated_add_edges_is_ignored() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B"]));

    let outcome = graph.add_edges(&id("A"), &package_ids(["C", "D"]));

    assert_eq!(outcome, EdgeInsert::Ignored);
    assert_eq!(graph.dependencies_of(&id("A")), vec!["B"]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_append_edges_extends_in_order() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B"]));
    graph.append_edges(&id("A"), &package_ids(["C", "B"]));

    assert_eq!(graph.dependencies_of(&id("A")), vec!["B", "C", "B"]);
}

#[test]
fn test_append_edges_creates_missing_key() {
    let mut graph = DependencyGraph::new();
    graph.append_edges(&id("A"), &package_ids(["B"]));

    assert!(graph.contains(&id("A")));
    assert_eq!(graph.dependencies_of(&id("A")), vec!["B"]);
}

#[test]
fn test_dependencies_of_unknown_package_is_empty() {
    let graph = reference_graph();
    assert!(graph.dependencies_of(&id("nope")).is_empty());
}

#[test]
fn test_referenced_package_is_not_a_key() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B"]));

    assert!(graph.contains(&id("A")));
    assert!(!graph.contains(&id("B")));
    assert!(graph.is_known(&id("B")));
    assert_eq!(graph.status(&id("B")), Some(&NodeStatus::Referenced));
    assert_eq!(graph.package_count(), 1);
}

#[test]
fn test_confirmed_leaf_differs_from_absent() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("leaf"), &[]);

    assert!(graph.contains(&id("leaf")));
    assert!(!graph.contains(&id("other")));
    assert!(graph.dependencies_of(&id("leaf")).is_empty());
    assert!(graph.dependencies_of(&id("other")).is_empty());
}

#[test]
fn test_failed_lookup_is_tagged() {
    let mut graph = DependencyGraph::new();
    graph.mark_failed(&id("X"), "registry unreachable");

    assert!(graph.contains(&id("X")));
    assert!(graph.dependencies_of(&id("X")).is_empty());
    assert_eq!(
        graph.status(&id("X")),
        Some(&NodeStatus::LookupFailed {
            reason: "registry unreachable".to_string()
        })
    );

    let failed: Vec<_> = graph.failed_packages().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].1, "registry unreachable");
}

#[test]
fn test_mark_truncated_does_not_downgrade_key() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B"]));

    assert!(graph.mark_truncated(&id("B")));
    assert!(!graph.mark_truncated(&id("A")));
    assert_eq!(graph.status(&id("B")), Some(&NodeStatus::Truncated));
    assert_eq!(graph.status(&id("A")), Some(&NodeStatus::Resolved));
}

#[test]
fn test_truncated_package_can_be_resolved_later() {
    let mut graph = DependencyGraph::new();
    graph.mark_truncated(&id("B"));

    assert_eq!(graph.add_edges(&id("B"), &package_ids(["C"])), EdgeInsert::Inserted);
    assert_eq!(graph.status(&id("B")), Some(&NodeStatus::Resolved));
}

// ============================================================================
// Identifier Normalisation
// ============================================================================

#[test]
fn test_identifiers_compare_case_insensitively() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("Newtonsoft.Json"), &package_ids(["System.Memory"]));

    assert!(graph.contains(&id("newtonsoft.json")));
    assert_eq!(
        graph.dependencies_of(&id("NEWTONSOFT.JSON")),
        vec!["system.memory"]
    );
    // Display keeps the first spelling
    assert_eq!(
        graph.all_packages().next().map(|p| p.to_string()),
        Some("Newtonsoft.Json".to_string())
    );
}

// ============================================================================
// Iteration and Reverse Lookup
// ============================================================================

#[test]
fn test_all_packages_in_insertion_order_and_restartable() {
    let graph = reference_graph();
    let packages = graph.all_packages();

    let first: Vec<_> = packages.clone().map(|p| p.as_str()).collect();
    let second: Vec<_> = packages.map(|p| p.as_str()).collect();

    assert_eq!(first, vec!["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(first, second);
}

#[test]
fn test_all_packages_uses_key_order_not_reference_order() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["C", "B"]));
    graph.add_edges(&id("B"), &[]);
    graph.add_edges(&id("C"), &[]);

    let order: Vec<_> = graph.all_packages().map(|p| p.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn test_reverse_dependents_in_scan_order() {
    let graph = reference_graph();
    assert_eq!(graph.reverse_dependents_of(&id("G")), vec!["D", "E"]);
    assert_eq!(graph.reverse_dependents_of(&id("B")), vec!["A"]);
    assert!(graph.reverse_dependents_of(&id("A")).is_empty());
}

#[test]
fn test_reverse_dependents_lists_each_parent_once() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B", "B"]));

    assert_eq!(graph.reverse_dependents_of(&id("B")), vec!["A"]);
}

// ============================================================================
// Whole-graph Cycle Reporting
// ============================================================================

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let graph = reference_graph();
    assert!(!graph.has_cycles());
    assert!(graph.cyclic_groups().is_empty());
}

#[test]
fn test_cyclic_groups_report_members() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["B"]));
    graph.add_edges(&id("B"), &package_ids(["C"]));
    graph.add_edges(&id("C"), &package_ids(["A", "D"]));
    graph.add_edges(&id("D"), &[]);

    assert!(graph.has_cycles());
    let groups = graph.cyclic_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0], vec!["A", "B", "C"]);
}

#[test]
fn test_self_loop_is_a_cyclic_group() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&id("A"), &package_ids(["A"]));

    assert!(graph.has_cycles());
    assert_eq!(graph.cyclic_groups(), vec![vec![id("A")]]);
}
