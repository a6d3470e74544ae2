//! Shared graph fixtures for E2E tests
//!
//! The reference graph used throughout:
//!
//! ```text
//! A -> B, C
//! B -> D, E
//! C -> F
//! D -> G
//! E -> G
//! ```

use depviz_lib::provider::StaticLookup;

/// Reference graph in manifest form
pub const REFERENCE_MANIFEST: &str = "\
# reference graph
A: B, C
B: D, E
C: F
D: G
E: G
F:
G:
";

/// Reference graph as a scripted in-memory provider
pub fn reference_lookup() -> StaticLookup {
    StaticLookup::from_pairs([
        ("A", &["B", "C"][..]),
        ("B", &["D", "E"][..]),
        ("C", &["F"][..]),
        ("D", &["G"][..]),
        ("E", &["G"][..]),
        ("F", &[][..]),
        ("G", &[][..]),
    ])
}

/// Flat-container `index.json` body listing `versions`
pub fn version_index(versions: &[&str]) -> String {
    serde_json::json!({ "versions": versions }).to_string()
}

/// Minimal `.nuspec` declaring `dependencies` in one framework group
pub fn nuspec_xml(id: &str, version: &str, dependencies: &[&str]) -> String {
    let deps: String = dependencies
        .iter()
        .map(|dep| format!("        <dependency id=\"{}\" version=\"1.0.0\" />\n", dep))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>{id}</id>
    <version>{version}</version>
    <dependencies>
      <group targetFramework="net8.0">
{deps}      </group>
    </dependencies>
  </metadata>
</package>
"#
    )
}
