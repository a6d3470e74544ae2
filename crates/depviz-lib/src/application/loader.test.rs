use super::*;
use crate::application::Commands;
use crate::primitives::ColorIntent;
use std::io::Write as _;

#[test]
fn test_load_from_arguments() {
    let loaded = CliConfig::load_from(
        ["depviz", "--package", "Serilog", "--jobs", "8", "order"],
        EnvironmentConfig::default(),
    )
    .unwrap();

    assert_eq!(loaded.app_config.package, "Serilog");
    assert_eq!(loaded.app_config.jobs, 8);
    assert_eq!(loaded.command, Some(Commands::Order));
}

#[test]
fn test_environment_colour_applies_before_cli() {
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let loaded = CliConfig::load_from(["depviz", "-p", "A"], environment.clone()).unwrap();
    assert_eq!(loaded.app_config.color, ColorIntent::Never);

    // An explicit flag still wins
    let loaded = CliConfig::load_from(["depviz", "-p", "A", "--color", "always"], environment)
        .unwrap();
    assert_eq!(loaded.app_config.color, ColorIntent::Always);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let result = CliConfig::load_from(["depviz"], EnvironmentConfig::default());
    assert!(matches!(
        result,
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_test_mode_with_manifest_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "A: B").unwrap();
    let path = file.path().display().to_string();

    let loaded = CliConfig::load_from(
        ["depviz", "-p", "A", "--test-mode", "--repo", path.as_str()],
        EnvironmentConfig::default(),
    )
    .unwrap();
    assert!(loaded.app_config.test_mode);
    assert_eq!(loaded.app_config.repo, path);
}

#[test]
fn test_bad_arguments_become_parse_errors() {
    let result = CliConfig::load_from(
        ["depviz", "-p", "A", "--max-depth", "many"],
        EnvironmentConfig::default(),
    );
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}
