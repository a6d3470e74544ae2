use super::*;
use crate::graph::package_ids;

fn graph_from(pairs: &[(&str, &[&str])]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (package, deps) in pairs {
        graph.add_edges(&PackageId::new(package), &package_ids(deps.iter()));
    }
    graph
}

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

#[test]
fn test_unicode_tree_of_reference_graph() {
    let tree = ascii_tree(&reference_graph(), &PackageId::new("A"), TreeCharset::Utf8);

    let expected = "\
A
├── B
│   ├── D
│   │   └── G
│   └── E
│       └── G
└── C
    └── F";
    assert_eq!(tree, expected);
}

#[test]
fn test_ascii_charset() {
    let graph = graph_from(&[("A", &["B", "C"]), ("B", &["D"])]);
    let tree = ascii_tree(&graph, &PackageId::new("A"), TreeCharset::Ascii);

    let expected = "\
A
+-- B
|   \\-- D
\\-- C";
    assert_eq!(tree, expected);
}

#[test]
fn test_repeated_subtree_marked_once() {
    let graph = graph_from(&[
        ("A", &["B", "C"]),
        ("B", &["Shared"]),
        ("C", &["Shared"]),
        ("Shared", &["Leaf"]),
        ("Leaf", &[]),
    ]);
    let tree = ascii_tree(&graph, &PackageId::new("A"), TreeCharset::Utf8);

    assert_eq!(tree.matches("Leaf").count(), 1);
    assert!(tree.contains("└── Shared (*)"));
}

#[test]
fn test_back_edge_marked_as_cycle() {
    let graph = graph_from(&[("A", &["B"]), ("B", &["A"])]);
    let tree = ascii_tree(&graph, &PackageId::new("A"), TreeCharset::Utf8);

    assert_eq!(tree, "A\n└── B\n    └── A (cycle)");
}

#[test]
fn test_failed_and_truncated_markers() {
    let mut graph = graph_from(&[("A", &["X", "T"])]);
    graph.mark_failed(&PackageId::new("X"), "unreachable");
    graph.mark_truncated(&PackageId::new("T"));

    let tree = ascii_tree(&graph, &PackageId::new("A"), TreeCharset::Utf8);

    assert!(tree.contains("├── X (lookup failed)"));
    assert!(tree.contains("└── T (...)"));
}

#[test]
fn test_lone_root() {
    let graph = DependencyGraph::new();
    assert_eq!(
        ascii_tree(&graph, &PackageId::new("Solo"), TreeCharset::Utf8),
        "Solo"
    );
}

#[test]
fn test_charset_parsing() {
    assert_eq!("unicode".parse::<TreeCharset>().unwrap(), TreeCharset::Utf8);
    assert_eq!("ASCII".parse::<TreeCharset>().unwrap(), TreeCharset::Ascii);
    assert_eq!(TreeCharset::Utf8.to_string(), "utf8");
}
