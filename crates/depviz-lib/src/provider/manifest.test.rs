// Tests for the manifest provider

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
# sample repository
A: B, C
B: D E
C: F
D: G
E: G
F:
G
";

#[test]
fn test_parse_sample_manifest() {
    let manifest = ManifestRepository::parse(SAMPLE).unwrap();

    assert_eq!(manifest.len(), 7);
    let order: Vec<_> = manifest.packages().map(|p| p.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(
        manifest.dependencies(&PackageId::new("B")).unwrap(),
        &[PackageId::new("D"), PackageId::new("E")]
    );
}

#[test]
fn test_colon_and_bare_lines_are_leaves() {
    let manifest = ManifestRepository::parse(SAMPLE).unwrap();
    assert_eq!(manifest.dependencies(&PackageId::new("F")), Some(&[][..]));
    assert_eq!(manifest.dependencies(&PackageId::new("G")), Some(&[][..]));
}

#[test]
fn test_blank_lines_and_comments_ignored() {
    let manifest = ManifestRepository::parse("\n   \n# only comments\n").unwrap();
    assert!(manifest.is_empty());
}

#[test]
fn test_missing_package_name_rejected() {
    let result = ManifestRepository::parse("A: B\n: C\n");
    assert!(matches!(result, Err(ManifestError::EmptyPackage { line: 2 })));
}

#[test]
fn test_name_version_line_rejected() {
    let result = ManifestRepository::parse("App: Core\nSystem.Text.Json:7.0.0\n");
    match result {
        Err(ManifestError::VersionToken {
            line,
            package,
            token,
        }) => {
            assert_eq!(line, 2);
            assert_eq!(package, "System.Text.Json");
            assert_eq!(token, "7.0.0");
        }
        other => panic!("expected version token error, got {:?}", other),
    }
}

#[test]
fn test_digits_inside_names_are_accepted() {
    let manifest = ManifestRepository::parse("App: Log4Net, Utf8Json\n").unwrap();
    assert_eq!(
        manifest.dependencies(&PackageId::new("App")).unwrap(),
        &[PackageId::new("Log4Net"), PackageId::new("Utf8Json")]
    );
}

#[test]
fn test_duplicate_package_rejected_case_insensitively() {
    let result = ManifestRepository::parse("Core: A\ncore: B\n");
    assert!(matches!(
        result,
        Err(ManifestError::DuplicatePackage {
            line: 2,
            first: 1,
            ..
        })
    ));
}

#[tokio::test]
async fn test_lookup_known_and_unknown_packages() {
    let manifest = ManifestRepository::parse(SAMPLE).unwrap();

    let deps = manifest.lookup(&PackageId::new("a")).await.unwrap();
    assert_eq!(deps, vec!["B", "C"]);

    let missing = manifest.lookup(&PackageId::new("Z")).await;
    assert!(matches!(missing, Err(LookupError::NotFound { .. })));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let manifest = ManifestRepository::load(file.path()).unwrap();
    assert_eq!(manifest.len(), 7);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let err = ManifestRepository::load(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
}
