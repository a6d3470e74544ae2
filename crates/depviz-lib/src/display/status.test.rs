use super::*;

#[test]
fn test_status_levels_do_not_panic() {
    let styling = StyleManager::new(false);
    let status = StatusDisplay::new(&styling);

    status.success("Newtonsoft.Json", "12 packages");
    status.success("done", "");
    status.error("Missing", "not found");
    status.warning("build cancelled");
    status.info("wrote report");
    status.subtle("run with --help for usage");
}

#[test]
fn test_join_skips_empty_details() {
    assert_eq!(StatusDisplay::join("item", ""), "item");
    assert_eq!(StatusDisplay::join("item", "details"), "item: details");
}

#[test]
fn test_plain_styling_has_no_escape_codes() {
    let styling = StyleManager::new(false);

    assert_eq!(styling.format_success("ok"), "✓ ok");
    assert_eq!(styling.format_error("bad"), "✗ bad");
    assert_eq!(styling.format_warning("hmm"), "! hmm");
    assert_eq!(styling.format_info("fyi"), "· fyi");
    assert!(!styling.color_enabled());
}

#[test]
fn test_forced_color_wraps_symbol() {
    let styling = StyleManager::new(true);
    let line = styling.format_success("ok");

    assert!(line.contains('\u{1b}'));
    assert!(line.ends_with(" ok"));
}
