//! Traversal helpers shared by the builder and the query engine

use super::PackageId;

/// One level of an explicit depth-first stack
#[derive(Debug)]
pub(crate) struct Frame {
    pub package: PackageId,
    pub depth: usize,
    children: Vec<PackageId>,
    next: usize,
}

impl Frame {
    pub fn new(package: PackageId, depth: usize, children: Vec<PackageId>) -> Self {
        Self {
            package,
            depth,
            children,
            next: 0,
        }
    }

    /// Next child not yet walked, advancing the cursor
    pub fn next_child(&mut self) -> Option<PackageId> {
        let child = self.children.get(self.next).cloned();
        if child.is_some() {
            self.next += 1;
        }
        child
    }
}

/// Case-insensitive substring exclusion
///
/// An empty or whitespace-only pattern excludes nothing.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExclusionFilter {
    needle: Option<String>,
}

impl ExclusionFilter {
    pub fn new(pattern: Option<&str>) -> Self {
        let needle = pattern
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_ascii_lowercase);
        Self { needle }
    }

    pub fn excludes(&self, package: &PackageId) -> bool {
        self.needle
            .as_deref()
            .is_some_and(|needle| package.contains_folded(needle))
    }

    /// Drop excluded identifiers, keeping order and duplicates
    pub fn apply(&self, dependencies: Vec<PackageId>) -> Vec<PackageId> {
        if self.needle.is_none() {
            return dependencies;
        }
        dependencies
            .into_iter()
            .filter(|dep| !self.excludes(dep))
            .collect()
    }
}

/// Whether a package found at `depth` may be expanded under `max_depth`
pub(crate) fn expands(depth: usize, max_depth: Option<usize>) -> bool {
    max_depth.is_none_or(|max| depth < max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::package_ids;

    #[test]
    fn test_frame_walks_children_in_order() {
        let mut frame = Frame::new(PackageId::new("A"), 0, package_ids(["B", "C"]));
        assert_eq!(frame.next_child(), Some(PackageId::new("B")));
        assert_eq!(frame.next_child(), Some(PackageId::new("C")));
        assert_eq!(frame.next_child(), None);
        assert_eq!(frame.next_child(), None);
    }

    #[test]
    fn test_filter_excludes_substring_case_insensitively() {
        let filter = ExclusionFilter::new(Some("foo"));
        let kept = filter.apply(package_ids(["Foo.Bar", "Baz", "FooExtra"]));
        assert_eq!(kept, vec!["Baz"]);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        for pattern in [None, Some(""), Some("   ")] {
            let filter = ExclusionFilter::new(pattern);
            let kept = filter.apply(package_ids(["Foo", "Foo"]));
            assert_eq!(kept.len(), 2);
        }
    }

    #[test]
    fn test_expands_respects_bound() {
        assert!(expands(0, Some(1)));
        assert!(!expands(1, Some(1)));
        assert!(expands(100, None));
    }
}
