// Tests for the in-memory provider

use super::*;

#[tokio::test]
async fn test_static_lookup_returns_scripted_dependencies() {
    let lookup = StaticLookup::new().with_dependencies("A", ["B", "C"]);

    let deps = lookup.lookup(&PackageId::new("a")).await.unwrap();
    assert_eq!(deps, vec!["B", "C"]);
}

#[tokio::test]
async fn test_static_lookup_unknown_package_is_not_found() {
    let lookup = StaticLookup::new();

    let result = lookup.lookup(&PackageId::new("Missing")).await;
    assert_eq!(
        result,
        Err(LookupError::NotFound {
            package: "Missing".to_string()
        })
    );
}

#[tokio::test]
async fn test_static_lookup_scripted_failure() {
    let lookup = StaticLookup::new().with_failure("X", "boom");

    let result = lookup.lookup(&PackageId::new("X")).await;
    assert!(matches!(result, Err(LookupError::Unavailable { reason, .. }) if reason == "boom"));
}

#[tokio::test]
async fn test_static_lookup_records_calls() {
    let lookup = StaticLookup::from_pairs([("A", &["B"][..]), ("B", &[][..])]);

    lookup.lookup(&PackageId::new("A")).await.unwrap();
    lookup.lookup(&PackageId::new("B")).await.unwrap();
    let _ = lookup.lookup(&PackageId::new("C")).await;

    assert_eq!(lookup.calls().await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_shared_lookup_delegates() {
    let lookup = Arc::new(StaticLookup::new().with_dependencies("A", ["B"]));

    let deps = DependencyLookup::lookup(&lookup, &PackageId::new("A")).await.unwrap();
    assert_eq!(deps, vec!["B"]);
    assert_eq!(lookup.calls().await.len(), 1);
}

#[test]
fn test_lookup_error_messages_name_the_package() {
    let id = PackageId::new("Serilog");
    assert_eq!(
        LookupError::not_found(&id).to_string(),
        "Package not found: Serilog"
    );
    assert!(LookupError::malformed(&id, "bad xml").to_string().contains("bad xml"));
}
