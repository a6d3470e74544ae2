use depviz_lib::application::{AppConfig, CliConfig, Commands, EnvironmentConfig};
use depviz_lib::graph::Discipline;
use depviz_lib::primitives::{ColorIntent, ConfigError};
use depviz_lib::render::TreeCharset;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert!(config.net_timeout > 0);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.charset, TreeCharset::Utf8);
}

#[test]
fn test_full_command_line() {
    let loaded = CliConfig::load_from(
        [
            "depviz",
            "--package",
            "Microsoft.Extensions.Logging",
            "--max-depth",
            "4",
            "--filter",
            "Test",
            "--discipline",
            "depth-first",
            "--charset",
            "ascii",
            "--ascii-tree",
            "closure",
            "2",
        ],
        EnvironmentConfig::default(),
    )
    .unwrap();

    let config = &loaded.app_config;
    assert_eq!(config.package, "Microsoft.Extensions.Logging");
    assert_eq!(config.max_depth, Some(4));
    assert_eq!(config.filter.as_deref(), Some("Test"));
    assert_eq!(config.discipline, Discipline::DepthFirst);
    assert_eq!(config.charset, TreeCharset::Ascii);
    assert!(config.ascii_tree);
    assert_eq!(loaded.command, Some(Commands::Closure { depth: 2 }));
}

#[test]
fn test_validation_failure_lists_reasons() {
    let config = AppConfig {
        max_depth: Some(0),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref reasons } if reasons.len() == 2));

    let message = err.to_string();
    assert!(message.contains("package name cannot be empty"));
    assert!(message.contains("max depth must be a positive number"));
}

#[test]
fn test_ci_disables_colour_by_default() {
    let environment = EnvironmentConfig {
        ci: Some("true".to_string()),
        ..EnvironmentConfig::default()
    };

    let loaded = CliConfig::load_from(["depviz", "-p", "A"], environment).unwrap();
    assert_eq!(loaded.app_config.color, ColorIntent::Never);
}
