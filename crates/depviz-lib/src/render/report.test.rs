use super::*;
use crate::graph::{DependencyGraph, GraphQuery, package_ids};

#[test]
fn test_direct_dependencies_numbered() {
    let report = direct_dependencies(&PackageId::new("A"), &package_ids(["B", "C"]));
    assert_eq!(report, "Direct dependencies of 'A':\n  1. B\n  2. C");
}

#[test]
fn test_direct_dependencies_empty() {
    let report = direct_dependencies(&PackageId::new("Leaf"), &[]);
    assert_eq!(report, "Direct dependencies of 'Leaf':\n  (no dependencies)");
}

#[test]
fn test_load_order_and_reverse_reports() {
    let order = load_order_report(&PackageId::new("A"), &package_ids(["B", "A"]));
    assert!(order.ends_with("  1. B\n  2. A"));

    let reverse = reverse_report(&PackageId::new("G"), &[]);
    assert_eq!(reverse, "Packages depending on 'G':\n  (none)");
}

#[test]
fn test_cycle_report() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&PackageId::new("A"), &package_ids(["B"]));
    graph.add_edges(&PackageId::new("B"), &package_ids(["A"]));
    let root = PackageId::new("A");
    let cycles = GraphQuery::new(&graph).detect_cycles(&root);

    assert_eq!(
        cycle_report(&root, &cycles),
        "Cycles reachable from 'A':\n  1. A -> B -> A"
    );
    assert_eq!(cycle_report(&root, &[]), "No cycles reachable from 'A'");
}

#[test]
fn test_closure_report_lists_depths() {
    let mut graph = DependencyGraph::new();
    graph.add_edges(&PackageId::new("A"), &package_ids(["B"]));
    graph.add_edges(&PackageId::new("B"), &[]);
    let root = PackageId::new("A");
    let closure = GraphQuery::new(&graph).bounded_closure(&root, 1);

    assert_eq!(
        closure_report(&root, 1, &closure),
        "Closure of 'A' within depth 1:\n  [0] A: B\n  [1] B: -"
    );
}

#[test]
fn test_config_table_aligns_keys() {
    let table = config_table(
        "Configuration",
        &[("package", "A".to_string()), ("max_depth", "3".to_string())],
    );
    let lines: Vec<_> = table.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "Configuration");
    assert_eq!(lines[3], "package   : A");
    assert_eq!(lines[4], "max_depth : 3");
    assert_eq!(lines[5], "=".repeat(50));
}
