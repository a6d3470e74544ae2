//! Read-only structural queries over a built graph
//!
//! [`GraphQuery`] borrows a [`DependencyGraph`] immutably, so any number of
//! queries (and renderers) can share one graph across threads.
//!
//! Two notions of "seen twice" exist in this crate and must not be mixed up.
//! The builder's revisit list fires whenever a package is reached again, which
//! includes diamonds (`A→B→D`, `A→C→D`). [`GraphQuery::detect_cycles`] only
//! reports back edges, i.e. edges into a package still on the active path.

use super::traverse::Frame;
use super::{DependencyGraph, Discipline, PackageId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// One settled package of a bounded closure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureEntry {
    pub package: PackageId,
    /// Hops from the root at which the package was first reached
    pub depth: usize,
    pub dependencies: Vec<PackageId>,
}

/// Packages reachable within a depth bound, in settlement order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    entries: Vec<ClosureEntry>,
    index: HashMap<PackageId, usize>,
}

impl Closure {
    fn settle(&mut self, package: PackageId, depth: usize, dependencies: Vec<PackageId>) {
        self.index.insert(package.clone(), self.entries.len());
        self.entries.push(ClosureEntry {
            package,
            depth,
            dependencies,
        });
    }

    pub fn entries(&self) -> &[ClosureEntry] {
        &self.entries
    }

    /// Stored dependency list of a settled package
    pub fn get(&self, package: &PackageId) -> Option<&[PackageId]> {
        self.index
            .get(package)
            .map(|&i| self.entries[i].dependencies.as_slice())
    }

    pub fn depth_of(&self, package: &PackageId) -> Option<usize> {
        self.index.get(package).map(|&i| self.entries[i].depth)
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageId> {
        self.entries.iter().map(|entry| &entry.package)
    }

    pub fn contains(&self, package: &PackageId) -> bool {
        self.index.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A dependency cycle; the first member is repeated at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub members: Vec<PackageId>,
}

impl Cycle {
    /// Whether `package` takes part in the cycle
    pub fn contains(&self, package: &PackageId) -> bool {
        self.members.contains(package)
    }

    /// Distinct packages in the cycle
    pub fn len(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", member)?;
        }
        Ok(())
    }
}

/// Query engine over a built graph
#[derive(Debug, Clone, Copy)]
pub struct GraphQuery<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> GraphQuery<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g DependencyGraph {
        self.graph
    }

    /// Every package within `max_depth` hops of `root`, with its stored list
    ///
    /// Breadth-first settlement: a package keeps the first depth it is
    /// reached at. Packages at exactly `max_depth` are included but their
    /// dependencies are not followed, so a depth of 0 yields only the root.
    pub fn bounded_closure(&self, root: &PackageId, max_depth: usize) -> Closure {
        let mut closure = Closure::default();
        let mut queued: HashSet<PackageId> = HashSet::from([root.clone()]);
        let mut queue = VecDeque::from([(root.clone(), 0usize)]);

        while let Some((package, depth)) = queue.pop_front() {
            let dependencies = self.graph.dependencies_of(&package);
            if depth < max_depth {
                for dependency in &dependencies {
                    if queued.insert(dependency.clone()) {
                        queue.push_back((dependency.clone(), depth + 1));
                    }
                }
            }
            closure.settle(package, depth, dependencies);
        }

        closure
    }

    /// Packages reachable from `root` (excluding the root itself)
    ///
    /// Breadth-first returns them in settlement order, depth-first in
    /// discovery order. Both return the same set for the same bound.
    pub fn transitive_dependencies(
        &self,
        root: &PackageId,
        max_depth: Option<usize>,
        discipline: Discipline,
    ) -> Vec<PackageId> {
        match discipline {
            Discipline::BreadthFirst => {
                let bound = max_depth.unwrap_or(usize::MAX);
                self.bounded_closure(root, bound)
                    .packages()
                    .filter(|package| *package != root)
                    .cloned()
                    .collect()
            }
            Discipline::DepthFirst => self.depth_first_reachable(root, max_depth),
        }
    }

    fn depth_first_reachable(&self, root: &PackageId, max_depth: Option<usize>) -> Vec<PackageId> {
        let within = |depth: usize| max_depth.is_none_or(|max| depth <= max);
        let follows = |depth: usize| max_depth.is_none_or(|max| depth < max);

        let mut reached = Vec::new();
        let mut best_depth: HashMap<PackageId, usize> = HashMap::from([(root.clone(), 0)]);
        let mut stack = vec![Frame::new(
            root.clone(),
            0,
            self.graph.dependencies_of(root),
        )];

        while let Some(frame) = stack.last_mut() {
            let depth = frame.depth + 1;
            let Some(child) = frame.next_child() else {
                stack.pop();
                continue;
            };

            if !within(depth) || best_depth.get(&child).is_some_and(|&seen| seen <= depth) {
                continue;
            }
            if best_depth.insert(child.clone(), depth).is_none() {
                reached.push(child.clone());
            }

            let children = if follows(depth) {
                self.graph.dependencies_of(&child)
            } else {
                Vec::new()
            };
            stack.push(Frame::new(child, depth, children));
        }

        reached.retain(|package| package != root);
        reached
    }

    /// Dependency-first linearisation of everything reachable from `root`
    ///
    /// Post-order depth-first walk; each package appears once, after all of
    /// its dependencies. On a cycle the visited guard decides the position,
    /// which is well defined but carries no topological meaning.
    pub fn load_order(&self, root: &PackageId) -> Vec<PackageId> {
        let mut order = Vec::new();
        let mut visited: HashSet<PackageId> = HashSet::from([root.clone()]);
        let mut stack = vec![Frame::new(
            root.clone(),
            0,
            self.graph.dependencies_of(root),
        )];

        while let Some(frame) = stack.last_mut() {
            match frame.next_child() {
                Some(child) => {
                    if visited.insert(child.clone()) {
                        let children = self.graph.dependencies_of(&child);
                        stack.push(Frame::new(child, 0, children));
                    }
                }
                None => {
                    if let Some(done) = stack.pop() {
                        order.push(done.package);
                    }
                }
            }
        }

        order
    }

    /// Keys that list `target` as a direct dependency, in key order
    pub fn reverse_dependents(&self, target: &PackageId) -> Vec<PackageId> {
        self.graph.reverse_dependents_of(target)
    }

    /// Genuine cycles reachable from `root`
    ///
    /// Walks with an explicit stack of the active path. Every edge into a
    /// package on that path yields one cycle: the path from that package to
    /// the edge's source, closed by repeating the package.
    pub fn detect_cycles(&self, root: &PackageId) -> Vec<Cycle> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<PackageId> = HashSet::from([root.clone()]);
        let mut on_path: HashSet<PackageId> = HashSet::from([root.clone()]);
        let mut stack = vec![Frame::new(
            root.clone(),
            0,
            self.graph.dependencies_of(root),
        )];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.next_child() else {
                if let Some(done) = stack.pop() {
                    on_path.remove(&done.package);
                }
                continue;
            };

            if on_path.contains(&child) {
                let start = stack
                    .iter()
                    .position(|frame| frame.package == child)
                    .unwrap_or(0);
                let mut members: Vec<PackageId> =
                    stack[start..].iter().map(|frame| frame.package.clone()).collect();
                members.push(child);
                cycles.push(Cycle { members });
                continue;
            }

            if visited.insert(child.clone()) {
                on_path.insert(child.clone());
                let children = self.graph.dependencies_of(&child);
                stack.push(Frame::new(child, 0, children));
            }
        }

        cycles
    }

    /// Whether any cycle is reachable from `root`
    pub fn has_cycle_from(&self, root: &PackageId) -> bool {
        !self.detect_cycles(root).is_empty()
    }
}

#[cfg(test)]
mod tests {
    include!("query.test.rs");
}
