use super::*;
use tempfile::{NamedTempFile, tempdir};

fn valid_config() -> AppConfig {
    AppConfig {
        package: "Newtonsoft.Json".to_string(),
        ..AppConfig::default()
    }
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.repo, NUGET_FLAT_CONTAINER);
    assert_eq!(config.max_depth, None);
    assert_eq!(config.net_timeout, 10);
    assert_eq!(config.discipline, Discipline::BreadthFirst);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(!config.test_mode);
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let parsed = AppConfig::try_parse_from(["depviz"]).unwrap();
    let default = AppConfig::default();

    assert_eq!(parsed.repo, default.repo);
    assert_eq!(parsed.max_depth, default.max_depth);
    assert_eq!(parsed.jobs, default.jobs);
    assert_eq!(parsed.net_timeout, default.net_timeout);
    assert_eq!(parsed.discipline, default.discipline);
    assert_eq!(parsed.charset, default.charset);
}

#[test]
fn test_merge_takes_non_default_values() {
    let base = AppConfig {
        package: "Base".to_string(),
        filter: Some("Test".to_string()),
        ..AppConfig::default()
    };
    let cli = AppConfig {
        package: "Cli".to_string(),
        max_depth: Some(7),
        discipline: Discipline::DepthFirst,
        ascii_tree: true,
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);
    assert_eq!(merged.package, "Cli");
    assert_eq!(merged.max_depth, Some(7));
    assert_eq!(merged.discipline, Discipline::DepthFirst);
    assert!(merged.ascii_tree);
    assert_eq!(merged.filter.as_deref(), Some("Test"));
    assert_eq!(merged.jobs, 4);
}

#[test]
fn test_validate_accepts_default_registry_config() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_validate_collects_every_reason() {
    let config = AppConfig {
        package: "  ".to_string(),
        repo: String::new(),
        max_depth: Some(0),
        ..AppConfig::default()
    };

    match config.validate() {
        Err(ConfigError::ValidationFailed { reasons }) => {
            assert_eq!(reasons.len(), 3);
            assert!(reasons[0].contains("package name"));
            assert!(reasons[1].contains("repository"));
            assert!(reasons[2].contains("max depth"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_validate_test_mode_requires_existing_file() {
    let config = AppConfig {
        test_mode: true,
        repo: "/definitely/not/here.txt".to_string(),
        ..valid_config()
    };
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("test file not found"));

    let dir = tempdir().unwrap();
    let config = AppConfig {
        test_mode: true,
        repo: dir.path().display().to_string(),
        ..valid_config()
    };
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("path is not a file"));

    let file = NamedTempFile::new().unwrap();
    let config = AppConfig {
        test_mode: true,
        repo: file.path().display().to_string(),
        ..valid_config()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_build_request_carries_bound_filter_discipline() {
    let config = AppConfig {
        max_depth: Some(5),
        filter: Some("Test".to_string()),
        discipline: Discipline::DepthFirst,
        jobs: 2,
        ..valid_config()
    };

    let request = config.to_build_request(&config.root());
    assert_eq!(request.root, PackageId::new("newtonsoft.json"));
    assert_eq!(request.max_depth, Some(5));
    assert_eq!(request.filter.as_deref(), Some("Test"));
    assert_eq!(request.discipline, Discipline::DepthFirst);
    assert_eq!(request.jobs, 2);
}

#[test]
fn test_omitted_max_depth_builds_unbounded() {
    let config = AppConfig::try_parse_from(["depviz", "--package", "A"]).unwrap();
    assert_eq!(config.max_depth, None);
    assert!(config.validate().is_ok());

    let request = config.to_build_request(&config.root());
    assert_eq!(request.max_depth, None);
}

#[test]
fn test_merge_keeps_bound_unless_overridden() {
    let base = AppConfig {
        max_depth: Some(4),
        ..valid_config()
    };
    assert_eq!(base.clone().merge_with(AppConfig::default()).max_depth, Some(4));

    let cli = AppConfig {
        max_depth: Some(2),
        ..AppConfig::default()
    };
    assert_eq!(base.merge_with(cli).max_depth, Some(2));
}

#[test]
fn test_summary_rows() {
    let rows = valid_config().summary_rows();
    let lookup = |key: &str| {
        rows.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .unwrap()
    };

    assert_eq!(lookup("Package"), "Newtonsoft.Json");
    assert_eq!(lookup("Test mode"), "OFF");
    assert_eq!(lookup("Max depth"), "unbounded");
    assert_eq!(lookup("Filter"), "none");
    assert_eq!(lookup("Output file"), "not specified");

    let bounded = AppConfig {
        max_depth: Some(3),
        ..valid_config()
    };
    let rows = bounded.summary_rows();
    assert!(rows.contains(&("Max depth", "3".to_string())));
}

#[test]
fn test_networking_config() {
    let config = AppConfig {
        jobs: 6,
        net_timeout: 20,
        ..valid_config()
    };
    let net = config.to_networking_config();
    assert_eq!(net.max_jobs, Some(6));
    assert_eq!(net.timeout_seconds, 20);
    assert!(!net.trace_requests);
}
