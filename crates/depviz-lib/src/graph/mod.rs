//! Dependency graph storage
//!
//! A `DependencyGraph` maps each package to the ordered list of its immediate
//! dependencies. It is populated by the [`builder`], then read by the
//! [`query`] engine and the renderers; nothing mutates it after the build.
//!
//! Every identifier ever mentioned gets a petgraph node, but only packages
//! whose dependency list was actually stored are *keys*. A package that is
//! only referenced as an edge target stays absent: `contains` is false and
//! `dependencies_of` is empty, which is distinct from a confirmed leaf.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::trace;

pub mod builder;
pub mod package;
pub mod query;
mod traverse;

pub use builder::{
    BuildError, BuildReport, BuildRequest, CancellationFlag, Discipline, GraphBuilder,
    LookupFailure,
};
pub use package::{PackageId, package_ids};
pub use query::{Closure, ClosureEntry, Cycle, GraphQuery};

/// Per-package state tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    /// Named as a dependency, never stored itself
    Referenced,
    /// Not expanded because it sits at or beyond the depth bound
    Truncated,
    /// Dependency list fetched and stored (empty = confirmed leaf)
    Resolved,
    /// Provider failed; stored with an empty list
    LookupFailed { reason: String },
}

impl NodeStatus {
    /// Whether the package counts as present in the graph
    pub fn is_key(&self) -> bool {
        matches!(self, NodeStatus::Resolved | NodeStatus::LookupFailed { .. })
    }
}

/// Node weight
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub id: PackageId,
    pub status: NodeStatus,
}

/// Edge weight; `position` restores insertion order of a dependency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub position: usize,
}

/// Outcome of [`DependencyGraph::add_edges`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// The package became a key with the given list
    Inserted,
    /// The package was already a key; nothing changed
    Ignored,
}

/// Directed package → dependency graph
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<PackageNode, DependencyEdge>,
    node_map: HashMap<PackageId, NodeIndex>,
    /// Keys in the order they were stored
    keys: Vec<NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &PackageId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(PackageNode {
            id: id.clone(),
            status: NodeStatus::Referenced,
        });
        self.node_map.insert(id.clone(), idx);
        idx
    }

    fn promote(&mut self, idx: NodeIndex, status: NodeStatus) {
        if !self.graph[idx].status.is_key() {
            self.keys.push(idx);
        }
        self.graph[idx].status = status;
    }

    fn push_edges(&mut self, idx: NodeIndex, dependencies: &[PackageId]) {
        let start = self.graph.edges(idx).count();
        for (offset, dependency) in dependencies.iter().enumerate() {
            let target = self.ensure_node(dependency);
            self.graph.add_edge(
                idx,
                target,
                DependencyEdge {
                    position: start + offset,
                },
            );
        }
    }

    /// Store `package`'s dependency list, preserving order and duplicates
    ///
    /// A second call for a package that is already a key is ignored: the
    /// first stored list wins and lists never accumulate by accident. Use
    /// [`append_edges`](Self::append_edges) to extend a list on purpose.
    pub fn add_edges(&mut self, package: &PackageId, dependencies: &[PackageId]) -> EdgeInsert {
        let idx = self.ensure_node(package);
        if self.graph[idx].status.is_key() {
            trace!("Ignoring repeated edge insert for {}", package);
            return EdgeInsert::Ignored;
        }

        self.promote(idx, NodeStatus::Resolved);
        self.push_edges(idx, dependencies);
        EdgeInsert::Inserted
    }

    /// Extend `package`'s dependency list, creating the key if absent
    pub fn append_edges(&mut self, package: &PackageId, dependencies: &[PackageId]) {
        let idx = self.ensure_node(package);
        if !self.graph[idx].status.is_key() {
            self.promote(idx, NodeStatus::Resolved);
        }
        self.push_edges(idx, dependencies);
    }

    /// Store `package` as a key with no dependencies because its lookup failed
    pub fn mark_failed(&mut self, package: &PackageId, reason: impl Into<String>) -> EdgeInsert {
        let idx = self.ensure_node(package);
        if self.graph[idx].status.is_key() {
            return EdgeInsert::Ignored;
        }

        self.promote(
            idx,
            NodeStatus::LookupFailed {
                reason: reason.into(),
            },
        );
        EdgeInsert::Inserted
    }

    /// Record that a referenced package was left unexpanded by the depth bound
    ///
    /// Returns false if the package is already a key.
    pub fn mark_truncated(&mut self, package: &PackageId) -> bool {
        let idx = self.ensure_node(package);
        let node = &mut self.graph[idx];
        if node.status.is_key() {
            return false;
        }
        node.status = NodeStatus::Truncated;
        true
    }

    /// Stored dependency list, or empty if `package` is not a key
    pub fn dependencies_of(&self, package: &PackageId) -> Vec<PackageId> {
        let Some(&idx) = self.node_map.get(package) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges(idx)
            .map(|edge| (edge.weight().position, edge.target()))
            .collect();
        edges.sort_unstable_by_key(|(position, _)| *position);

        edges
            .into_iter()
            .map(|(_, target)| self.graph[target].id.clone())
            .collect()
    }

    /// Every key, in insertion order; cheap to clone and restart
    pub fn all_packages(&self) -> impl Iterator<Item = &PackageId> + Clone + '_ {
        self.keys.iter().map(move |&idx| &self.graph[idx].id)
    }

    /// Keys whose dependency list contains `package`, in key order
    pub fn reverse_dependents_of(&self, package: &PackageId) -> Vec<PackageId> {
        self.keys
            .iter()
            .filter(|&&idx| {
                self.graph
                    .edges(idx)
                    .any(|edge| self.graph[edge.target()].id == *package)
            })
            .map(|&idx| self.graph[idx].id.clone())
            .collect()
    }

    /// Status tag for any known identifier (key or referenced)
    pub fn status(&self, package: &PackageId) -> Option<&NodeStatus> {
        self.node_map
            .get(package)
            .map(|&idx| &self.graph[idx].status)
    }

    /// Whether `package` is a key
    pub fn contains(&self, package: &PackageId) -> bool {
        self.status(package).is_some_and(NodeStatus::is_key)
    }

    /// Whether `package` has been mentioned at all
    pub fn is_known(&self, package: &PackageId) -> bool {
        self.node_map.contains_key(package)
    }

    /// Number of keys
    pub fn package_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of stored dependency edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys whose lookup failed, with the recorded reason
    pub fn failed_packages(&self) -> impl Iterator<Item = (&PackageId, &str)> + '_ {
        self.keys.iter().filter_map(move |&idx| match &self.graph[idx].status {
            NodeStatus::LookupFailed { reason } => Some((&self.graph[idx].id, reason.as_str())),
            _ => None,
        })
    }

    /// Whether any cycle exists anywhere in the graph
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Strongly connected groups that form cycles (size > 1, or a self loop)
    ///
    /// Members are listed in node creation order, groups by their first
    /// member. Unlike [`GraphQuery::detect_cycles`] this needs no root.
    pub fn cyclic_groups(&self) -> Vec<Vec<PackageId>> {
        let mut groups: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| match scc.as_slice() {
                [single] => self.graph.find_edge(*single, *single).is_some(),
                _ => true,
            })
            .map(|mut scc| {
                scc.sort_unstable();
                scc
            })
            .collect();
        groups.sort_unstable_by_key(|scc| scc[0]);

        groups
            .into_iter()
            .map(|scc| scc.into_iter().map(|idx| self.graph[idx].id.clone()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
