//! Plain list reports

use crate::graph::{Closure, Cycle, PackageId};
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

fn numbered(out: &mut String, items: &[PackageId], empty: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "  ({})", empty);
        return;
    }
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, item);
    }
}

fn finish(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Numbered list of `package`'s direct dependencies
pub fn direct_dependencies(package: &PackageId, dependencies: &[PackageId]) -> String {
    let mut out = format!("Direct dependencies of '{}':\n", package);
    numbered(&mut out, dependencies, "no dependencies");
    finish(out)
}

/// Dependency-first load order
pub fn load_order_report(root: &PackageId, order: &[PackageId]) -> String {
    let mut out = format!("Load order for '{}' (dependencies first):\n", root);
    numbered(&mut out, order, "nothing to load");
    finish(out)
}

/// Packages that depend directly on `target`
pub fn reverse_report(target: &PackageId, dependents: &[PackageId]) -> String {
    let mut out = format!("Packages depending on '{}':\n", target);
    numbered(&mut out, dependents, "none");
    finish(out)
}

/// One line per detected cycle
pub fn cycle_report(root: &PackageId, cycles: &[Cycle]) -> String {
    if cycles.is_empty() {
        return format!("No cycles reachable from '{}'", root);
    }

    let mut out = format!("Cycles reachable from '{}':\n", root);
    for (i, cycle) in cycles.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, cycle);
    }
    finish(out)
}

/// Settled packages of a bounded closure with their depth and edges
pub fn closure_report(root: &PackageId, max_depth: usize, closure: &Closure) -> String {
    let mut out = format!("Closure of '{}' within depth {}:\n", root, max_depth);
    for entry in closure.entries() {
        let deps: Vec<_> = entry.dependencies.iter().map(PackageId::as_str).collect();
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            entry.depth,
            entry.package,
            if deps.is_empty() {
                "-".to_string()
            } else {
                deps.join(", ")
            }
        );
    }
    finish(out)
}

/// Key/value table framed by rules
pub fn config_table(title: &str, rows: &[(&str, String)]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    let mut out = format!("{}\n{}\n{}\n", rule, title, rule);
    for (key, value) in rows {
        let _ = writeln!(out, "{:<width$} : {}", key, value, width = width);
    }
    out.push_str(&rule);
    out
}

#[cfg(test)]
mod tests {
    include!("report.test.rs");
}
