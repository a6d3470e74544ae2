//! PlantUML component diagram

use crate::graph::{DependencyGraph, NodeStatus, PackageId};
use std::collections::{HashSet, VecDeque};
use std::fmt::Write;

fn quoted(package: &PackageId) -> String {
    format!("\"{}\"", package.as_str().replace('"', "'"))
}

/// Diagram of every edge reachable from `root`, in breadth-first order
///
/// Each distinct edge appears once. Packages whose lookup failed are
/// drawn with a dashed border.
pub fn plantuml(graph: &DependencyGraph, root: &PackageId) -> String {
    let mut out = String::from("@startuml\n");
    let _ = writeln!(out, "title Dependencies of {}", root);
    out.push_str("skinparam componentStyle rectangle\n");

    let mut edges: Vec<String> = Vec::new();
    let mut seen_edges: HashSet<(PackageId, PackageId)> = HashSet::new();
    let mut failed: Vec<&PackageId> = Vec::new();
    let mut queued: HashSet<PackageId> = HashSet::from([root.clone()]);
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(package) = queue.pop_front() {
        for dependency in graph.dependencies_of(&package) {
            if seen_edges.insert((package.clone(), dependency.clone())) {
                edges.push(format!("{} --> {}", quoted(&package), quoted(&dependency)));
            }
            if queued.insert(dependency.clone()) {
                queue.push_back(dependency);
            }
        }
    }

    for package in graph.all_packages() {
        if package != root
            && queued.contains(package)
            && matches!(graph.status(package), Some(NodeStatus::LookupFailed { .. }))
        {
            failed.push(package);
        }
    }

    let _ = writeln!(out, "component {}", quoted(root));
    for package in failed {
        let _ = writeln!(out, "component {} #line.dashed", quoted(package));
    }
    for edge in edges {
        out.push_str(&edge);
        out.push('\n');
    }

    out.push_str("@enduml");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::package_ids;

    #[test]
    fn test_diagram_lists_each_edge_once_in_bfs_order() {
        let mut graph = DependencyGraph::new();
        graph.add_edges(&PackageId::new("A"), &package_ids(["B", "C", "B"]));
        graph.add_edges(&PackageId::new("B"), &package_ids(["C"]));
        graph.add_edges(&PackageId::new("C"), &[]);

        let diagram = plantuml(&graph, &PackageId::new("A"));
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines.first(), Some(&"@startuml"));
        assert_eq!(lines.last(), Some(&"@enduml"));
        let edges: Vec<_> = lines.iter().filter(|l| l.contains("-->")).collect();
        assert_eq!(
            edges,
            vec![&"\"A\" --> \"B\"", &"\"A\" --> \"C\"", &"\"B\" --> \"C\""]
        );
    }

    #[test]
    fn test_unreachable_edges_are_omitted() {
        let mut graph = DependencyGraph::new();
        graph.add_edges(&PackageId::new("A"), &package_ids(["B"]));
        graph.add_edges(&PackageId::new("X"), &package_ids(["Y"]));

        let diagram = plantuml(&graph, &PackageId::new("A"));
        assert!(!diagram.contains("\"X\""));
    }

    #[test]
    fn test_failed_lookup_drawn_dashed() {
        let mut graph = DependencyGraph::new();
        graph.add_edges(&PackageId::new("A"), &package_ids(["X"]));
        graph.mark_failed(&PackageId::new("X"), "404");

        let diagram = plantuml(&graph, &PackageId::new("A"));
        assert!(diagram.contains("component \"X\" #line.dashed"));
        assert!(diagram.contains("title Dependencies of A"));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = DependencyGraph::new();
        graph.add_edges(&PackageId::new("A"), &package_ids(["B"]));
        graph.add_edges(&PackageId::new("B"), &package_ids(["A"]));

        let diagram = plantuml(&graph, &PackageId::new("A"));
        assert!(diagram.contains("\"B\" --> \"A\""));
    }
}
