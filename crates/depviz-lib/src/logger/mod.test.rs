use super::*;

#[test]
fn test_default_directives_follow_level() {
    let directives = Logger::default_directives(LogLevel::Debug);
    assert!(directives.starts_with("depviz=debug,depviz_lib=debug"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_default_directives_parse_as_env_filter() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        let directives = Logger::default_directives(level);
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "directives should parse: {}",
            directives
        );
    }
}

#[test]
fn test_logger_not_initialized_initially() {
    // Other tests in this binary never install the global logger
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
