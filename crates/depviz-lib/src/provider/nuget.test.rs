// Tests for the NuGet flat-container provider

use super::*;
use crate::networking::NetworkingConfig;
use mockito::Server;

const SERILOG_NUSPEC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>Serilog.Sinks.File</id>
    <version>5.0.0</version>
    <dependencies>
      <group targetFramework=".NETFramework4.5">
        <dependency id="Serilog" version="2.10.0" exclude="Build,Analyzers" />
      </group>
      <group targetFramework=".NETStandard2.0">
        <dependency id="Serilog" version="2.10.0" exclude="Build,Analyzers" />
        <dependency id="System.Text.Encoding.Extensions" version="4.3.0" />
      </group>
    </dependencies>
  </metadata>
</package>"#;

fn registry(server: &Server) -> NugetRegistry {
    let networking = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    NugetRegistry::with_base_url(Arc::new(networking), server.url())
}

// ============================================================================
// nuspec parsing
// ============================================================================

#[test]
fn test_parse_grouped_dependencies_deduplicated() {
    let deps = parse_nuspec_dependencies(SERILOG_NUSPEC).unwrap();
    assert_eq!(deps, vec!["Serilog", "System.Text.Encoding.Extensions"]);
}

#[test]
fn test_parse_flat_dependencies_keep_order() {
    let xml = r#"<package><metadata>
        <dependencies>
          <dependency id="Zeta" version="1.0" />
          <dependency id="Alpha" version="1.0"></dependency>
        </dependencies>
    </metadata></package>"#;

    let deps = parse_nuspec_dependencies(xml).unwrap();
    assert_eq!(deps, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_parse_ignores_id_outside_dependencies() {
    let xml = r#"<package><metadata>
        <id>Self.Package</id>
        <frameworkAssemblies>
          <frameworkAssembly assemblyName="System.Xml" id="NotADependency" />
        </frameworkAssemblies>
        <dependencies />
    </metadata></package>"#;

    assert!(parse_nuspec_dependencies(xml).unwrap().is_empty());
}

#[test]
fn test_parse_without_dependencies_section() {
    let xml = "<package><metadata><id>Leaf</id></metadata></package>";
    assert!(parse_nuspec_dependencies(xml).unwrap().is_empty());
}

#[test]
fn test_parse_rejects_broken_xml() {
    let xml = "<package><metadata><dependencies></metadata></package>";
    assert!(parse_nuspec_dependencies(xml).is_err());
}

// ============================================================================
// Registry lookups
// ============================================================================

#[tokio::test]
async fn test_lookup_uses_last_listed_version() {
    let mut server = Server::new_async().await;
    let index = server
        .mock("GET", "/serilog.sinks.file/index.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"versions":["4.1.0","5.0.0"]}"#)
        .expect(1)
        .create_async()
        .await;
    let nuspec = server
        .mock("GET", "/serilog.sinks.file/5.0.0/serilog.sinks.file.nuspec")
        .with_status(200)
        .with_body(SERILOG_NUSPEC)
        .expect(1)
        .create_async()
        .await;

    let deps = registry(&server)
        .lookup(&PackageId::new("Serilog.Sinks.File"))
        .await
        .unwrap();

    assert_eq!(deps, vec!["Serilog", "System.Text.Encoding.Extensions"]);
    index.assert_async().await;
    nuspec.assert_async().await;
}

#[tokio::test]
async fn test_lookup_404_is_not_found() {
    let mut server = Server::new_async().await;
    let _index = server
        .mock("GET", "/does.not.exist/index.json")
        .with_status(404)
        .create_async()
        .await;

    let result = registry(&server)
        .lookup(&PackageId::new("Does.Not.Exist"))
        .await;

    assert!(matches!(result, Err(LookupError::NotFound { .. })));
}

#[tokio::test]
async fn test_lookup_with_no_versions_is_not_found() {
    let mut server = Server::new_async().await;
    let _index = server
        .mock("GET", "/empty/index.json")
        .with_status(200)
        .with_body(r#"{"versions":[]}"#)
        .create_async()
        .await;

    let result = registry(&server).lookup(&PackageId::new("Empty")).await;
    assert!(matches!(result, Err(LookupError::NotFound { .. })));
}

#[tokio::test]
async fn test_lookup_server_error_is_unavailable() {
    let mut server = Server::new_async().await;
    let _index = server
        .mock("GET", "/flaky/index.json")
        .with_status(503)
        .create_async()
        .await;

    let result = registry(&server).lookup(&PackageId::new("Flaky")).await;
    assert!(matches!(
        result,
        Err(LookupError::Unavailable { reason, .. }) if reason.contains("503")
    ));
}

#[tokio::test]
async fn test_lookup_bad_index_is_malformed() {
    let mut server = Server::new_async().await;
    let _index = server
        .mock("GET", "/garbled/index.json")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let result = registry(&server).lookup(&PackageId::new("Garbled")).await;
    assert!(matches!(result, Err(LookupError::Malformed { .. })));
}

#[test]
fn test_default_base_url_and_trailing_slash() {
    let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default()).unwrap());
    assert_eq!(
        NugetRegistry::new(networking.clone()).base_url(),
        NUGET_FLAT_CONTAINER
    );
    assert_eq!(
        NugetRegistry::with_base_url(networking, "http://mirror/v3/").base_url(),
        "http://mirror/v3"
    );
}
