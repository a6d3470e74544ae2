use super::*;

fn env(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_pairs(pairs.iter().copied()).unwrap()
}

#[test]
fn test_no_variables_keeps_intent() {
    let config = env(&[]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(
        config.apply_color_config(ColorIntent::Always),
        ColorIntent::Always
    );
}

#[test]
fn test_no_color_disables() {
    let config = env(&[("NO_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let config = env(&[("NO_COLOR", "")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables() {
    let config = env(&[("CLICOLOR", "0")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_force_color_wins_over_no_color() {
    let config = env(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    assert_eq!(
        config.apply_color_config(ColorIntent::Auto),
        ColorIntent::Always
    );
}

#[test]
fn test_force_color_false_disables() {
    let config = env(&[("FORCE_COLOR", "false")]);
    assert_eq!(
        config.apply_color_config(ColorIntent::Always),
        ColorIntent::Never
    );
}

#[test]
fn test_ci_beats_force_color() {
    let config = env(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}
