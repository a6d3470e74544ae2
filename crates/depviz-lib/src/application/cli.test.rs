use super::*;
use crate::graph::Discipline;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parses_global_options_and_subcommand() {
    let cli = Cli::try_parse_from([
        "depviz",
        "--package",
        "Serilog",
        "--max-depth",
        "2",
        "--discipline",
        "dfs",
        "reverse",
        "Newtonsoft.Json",
    ])
    .unwrap();

    assert_eq!(cli.config.package, "Serilog");
    assert_eq!(cli.config.max_depth, Some(2));
    assert_eq!(cli.config.discipline, Discipline::DepthFirst);
    assert_eq!(
        cli.command,
        Some(Commands::Reverse {
            target: "Newtonsoft.Json".to_string()
        })
    );
}

#[test]
fn test_closure_takes_depth() {
    let cli = Cli::try_parse_from(["depviz", "-p", "A", "closure", "2"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Closure { depth: 2 }));
}

#[test]
fn test_default_command_follows_ascii_tree_flag() {
    let mut config = AppConfig::default();
    assert_eq!(Commands::default_for(&config), Commands::Deps);

    config.ascii_tree = true;
    assert_eq!(Commands::default_for(&config), Commands::Tree);
}

#[test]
fn test_only_config_skips_the_build() {
    assert!(!Commands::Config.requires_graph());
    assert!(Commands::Cycles.requires_graph());
}

#[test]
fn test_rejects_unknown_discipline() {
    let result = Cli::try_parse_from(["depviz", "--discipline", "random"]);
    assert!(result.is_err());
}
