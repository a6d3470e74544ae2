//! Indented dependency tree
//!
//! ```text
//! A
//! ├── B
//! │   ├── D
//! │   │   └── G
//! │   └── E
//! │       └── G
//! └── C
//!     └── F
//! ```
//!
//! A package whose subtree was already printed is shown once more with `(*)`
//! and not expanded again. An edge back into the current path is marked
//! `(cycle)`. Failed lookups and depth-truncated packages carry their own
//! markers so they are not mistaken for leaves.

use crate::graph::{DependencyGraph, NodeStatus, PackageId};
use crate::impl_fromstr_for_value_enum;
use std::collections::HashSet;

/// Box-drawing set used for branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeCharset {
    #[default]
    #[serde(alias = "unicode")]
    Utf8,
    Ascii,
}

impl clap::ValueEnum for TreeCharset {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Utf8, Self::Ascii]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Utf8 => Some(
                clap::builder::PossibleValue::new("utf8")
                    .alias("utf-8")
                    .alias("unicode"),
            ),
            Self::Ascii => Some(clap::builder::PossibleValue::new("ascii").alias("plain")),
        }
    }
}

impl_fromstr_for_value_enum!(TreeCharset, "invalid tree charset");

struct Glyphs {
    tee: &'static str,
    corner: &'static str,
    pipe: &'static str,
    blank: &'static str,
}

impl TreeCharset {
    fn glyphs(self) -> Glyphs {
        match self {
            TreeCharset::Utf8 => Glyphs {
                tee: "├── ",
                corner: "└── ",
                pipe: "│   ",
                blank: "    ",
            },
            TreeCharset::Ascii => Glyphs {
                tee: "+-- ",
                corner: "\\-- ",
                pipe: "|   ",
                blank: "    ",
            },
        }
    }
}

struct Branch {
    package: PackageId,
    children: Vec<PackageId>,
    next: usize,
    prefix: String,
}

fn status_marker(graph: &DependencyGraph, package: &PackageId) -> Option<&'static str> {
    match graph.status(package) {
        Some(NodeStatus::LookupFailed { .. }) => Some("(lookup failed)"),
        Some(NodeStatus::Truncated) => Some("(...)"),
        _ => None,
    }
}

fn push_line(out: &mut String, prefix: &str, connector: &str, package: &PackageId, marker: Option<&str>) {
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(package.as_str());
    if let Some(marker) = marker {
        out.push(' ');
        out.push_str(marker);
    }
    out.push('\n');
}

/// Render the tree of everything reachable from `root`
pub fn ascii_tree(graph: &DependencyGraph, root: &PackageId, charset: TreeCharset) -> String {
    let glyphs = charset.glyphs();
    let mut out = String::new();
    push_line(&mut out, "", "", root, status_marker(graph, root));

    let mut expanded: HashSet<PackageId> = HashSet::from([root.clone()]);
    let mut on_path: HashSet<PackageId> = HashSet::from([root.clone()]);
    let mut stack = vec![Branch {
        package: root.clone(),
        children: graph.dependencies_of(root),
        next: 0,
        prefix: String::new(),
    }];

    while let Some(branch) = stack.last_mut() {
        let Some(child) = branch.children.get(branch.next).cloned() else {
            if let Some(done) = stack.pop() {
                on_path.remove(&done.package);
            }
            continue;
        };
        branch.next += 1;

        let last = branch.next == branch.children.len();
        let connector = if last { glyphs.corner } else { glyphs.tee };
        let prefix = branch.prefix.clone();
        let child_prefix = format!("{}{}", prefix, if last { glyphs.blank } else { glyphs.pipe });

        let children = graph.dependencies_of(&child);
        if on_path.contains(&child) {
            push_line(&mut out, &prefix, connector, &child, Some("(cycle)"));
        } else if !children.is_empty() && expanded.contains(&child) {
            push_line(&mut out, &prefix, connector, &child, Some("(*)"));
        } else {
            push_line(&mut out, &prefix, connector, &child, status_marker(graph, &child));
            if !children.is_empty() {
                expanded.insert(child.clone());
                on_path.insert(child.clone());
                stack.push(Branch {
                    package: child,
                    children,
                    next: 0,
                    prefix: child_prefix,
                });
            }
        }
    }

    // Drop the trailing newline
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    include!("tree.test.rs");
}
