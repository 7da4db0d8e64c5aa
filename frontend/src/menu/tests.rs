use super::*;
use crate::session::tests::node;

fn auth(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn names(crumbs: &[Crumb]) -> Vec<&str> {
    crumbs.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn permission_check_handles_missing_auth_set() {
    assert!(!has_permission(None, Some("board")));
    let board = auth(&["mainBoard"]);
    assert!(has_permission(Some(board.as_slice()), None));
    assert!(has_permission(Some(&[][..]), Some("")));
    assert!(has_permission(None, None));
}

#[test]
fn permission_check_requires_exact_key() {
    let set = auth(&["mainBoard", "notice"]);
    let set = Some(set.as_slice());
    assert!(has_permission(set, Some("notice")));
    assert!(!has_permission(set, Some("meetingroom")));
    assert!(!has_permission(set, Some("board")));
}

#[test]
fn board_family_shares_one_permission_key() {
    assert_eq!(permission_key_for("board"), "mainBoard");
    assert_eq!(permission_key_for("BoardView"), "mainBoard");
    assert_eq!(permission_key_for("boardWrite"), "mainBoard");
    assert_eq!(permission_key_for("MeetingRoom"), "meetingroom");
}

#[test]
fn breadcrumb_follows_parent_then_child() {
    let menu = vec![node(
        "a",
        "A",
        Some("/main/a"),
        vec![node("b", "B", Some("/main/a/b"), vec![])],
    )];

    let crumbs = breadcrumbs("/main/a/b", &menu);

    assert_eq!(names(&crumbs), vec!["Home", "A", "B"]);
    let last: Vec<bool> = crumbs.iter().map(|c| c.is_last).collect();
    assert_eq!(last, vec![false, false, true]);
    assert_eq!(crumbs[1].path.as_deref(), Some("/main/a"));
    assert_eq!(crumbs[2].path.as_deref(), Some("/main/a/b"));
}

#[test]
fn breadcrumb_attributes_group_parent_without_link() {
    let menu = vec![node(
        "community",
        "Community",
        None,
        vec![node("notice", "Notices", Some("/main/notice"), vec![])],
    )];

    let crumbs = breadcrumbs("/main/notice", &menu);

    assert_eq!(names(&crumbs), vec!["Home", "Community", "Notices"]);
    assert_eq!(crumbs[1].path, None);
    assert!(crumbs[2].is_last);
}

#[test]
fn breadcrumb_skips_unmatched_prefixes() {
    let menu = vec![node("a", "A", Some("/main/a"), vec![])];

    let crumbs = breadcrumbs("/main/unknown/deeper", &menu);

    assert_eq!(names(&crumbs), vec!["Home"]);
    assert!(crumbs[0].is_last);
}

#[test]
fn breadcrumb_matching_ignores_case() {
    let menu = vec![node("a", "A", Some("/main/meetingRoom"), vec![])];
    assert_eq!(names(&breadcrumbs("/Main/MeetingRoom", &menu)), vec!["Home", "A"]);
}

#[test]
fn find_by_url_searches_children() {
    let menu = MenuIndex::load();
    let found = find_by_url(menu.desktop(), "/main/board").map(|n| n.id.as_str());
    assert_eq!(found, Some("mainBoard"));
    assert!(find_by_url(menu.desktop(), "/main/none").is_none());
}

#[test]
fn embedded_fixture_parses() {
    let menu = MenuIndex::load();
    assert!(!menu.desktop().is_empty());
    assert!(menu.mobile().iter().all(|n| n.url.is_some()));
}

#[test]
fn malformed_fixture_yields_empty_index() {
    for json in ["{not json", r#"{"desktop":5}"#] {
        let menu = MenuIndex::from_json(json);
        assert_eq!(menu, MenuIndex::default(), "{}", json);
    }
}
