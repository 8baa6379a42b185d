//! Unit tests for the section router.

use gitpanel::managers::tab_router::{TabRouter, TabRouterTrait};
use gitpanel::types::errors::RouterError;
use gitpanel::types::settings::ClientSettings;

fn router() -> TabRouter {
    TabRouter::from_settings(&ClientSettings::default()).unwrap()
}

#[test]
fn test_starts_on_default_section() {
    let r = router();
    assert_eq!(r.active_section(), "overview");
    assert_eq!(r.default_section(), "overview");
    assert_eq!(r.fragment(), "#overview");
    assert!(r.is_visible("overview"));
    assert!(!r.is_visible("github"));
}

#[test]
fn test_navigate_shows_exactly_one_section() {
    let mut r = router();
    r.navigate_to("gitlab").unwrap();

    assert_eq!(r.fragment(), "#gitlab");
    let visible: Vec<&str> = r
        .sections()
        .iter()
        .map(String::as_str)
        .filter(|s| r.is_visible(s))
        .collect();
    assert_eq!(visible, vec!["gitlab"]);

    let active: Vec<String> = r
        .nav_entries()
        .into_iter()
        .filter(|e| e.active)
        .map(|e| e.id)
        .collect();
    assert_eq!(active, vec!["gitlab".to_string()]);
}

#[test]
fn test_navigate_unknown_section_keeps_state() {
    let mut r = router();
    r.navigate_to("github").unwrap();

    let err = r.navigate_to("settings").unwrap_err();
    assert_eq!(err, RouterError::UnknownSection("settings".to_string()));
    assert_eq!(r.active_section(), "github");
}

#[test]
fn test_fragment_selects_section() {
    let mut r = router();
    assert_eq!(r.handle_fragment("#unified"), "unified");
    assert_eq!(r.handle_fragment("github"), "github");
}

#[test]
fn test_empty_or_unknown_fragment_falls_back_to_default() {
    let mut r = router();
    r.navigate_to("github").unwrap();
    assert_eq!(r.handle_fragment(""), "overview");

    r.navigate_to("gitlab").unwrap();
    assert_eq!(r.handle_fragment("#nowhere"), "overview");
    assert_eq!(r.fragment(), "#overview");
}

#[test]
fn test_construction_is_validated() {
    assert_eq!(
        TabRouter::new(Vec::new(), "overview").unwrap_err(),
        RouterError::NoSections
    );
    assert_eq!(
        TabRouter::new(vec!["a".to_string()], "b").unwrap_err(),
        RouterError::UnknownSection("b".to_string())
    );
}
