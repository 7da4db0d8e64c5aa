use super::*;
use crate::session::tests::user;

fn table() -> RouteTable<()> {
    RouteTable::build(
        [
            "pages/Login",
            "pages/Join",
            "pages/main/MainHome",
            "pages/main/Board",
            "pages/main/BoardView",
            "pages/main/Notice",
            "pages/mobile/MobileLogin",
            "pages/mobile/MobileMain",
            "pages/mobile/carReservation",
        ]
        .map(|k| (k, ())),
    )
    .unwrap()
}

fn rendered(res: &Resolution) -> Option<(&str, Option<Shell>)> {
    match res {
        Resolution::Render { descriptor, shell } => Some((descriptor.path.as_str(), *shell)),
        _ => None,
    }
}

#[test]
fn anonymous_user_is_sent_to_login_for_gated_page() {
    let res = resolve("/main/board", &table(), None);
    assert_eq!(res, Resolution::RedirectLogin("/Login"));
}

#[test]
fn signed_in_user_renders_gated_page_in_desktop_shell() {
    let kim = user("kim", &["mainBoard"]);
    let table = table();
    let res = resolve("/main/board", &table, Some(&kim));
    assert_eq!(rendered(&res), Some(("/main/board", Some(Shell::Desktop))));
}

#[test]
fn mobile_pages_use_mobile_shell_and_mobile_login() {
    let table = table();
    assert_eq!(
        resolve("/mobile/CarReservation", &table, None),
        Resolution::RedirectLogin("/mobile/Login")
    );

    let kim = user("kim", &[]);
    let res = resolve("/mobile/carreservation", &table, Some(&kim));
    assert_eq!(
        rendered(&res),
        Some(("/mobile/CarReservation", Some(Shell::Mobile)))
    );
}

#[test]
fn signed_in_user_is_bounced_off_login_pages() {
    let table = table();
    let kim = user("kim", &[]);
    assert_eq!(
        resolve("/Login", &table, Some(&kim)),
        Resolution::RedirectHome("/main")
    );
    assert_eq!(
        resolve("/mobile/login", &table, Some(&kim)),
        Resolution::RedirectHome("/mobile/Main")
    );
    assert_eq!(
        resolve("/join", &table, Some(&kim)),
        Resolution::RedirectHome("/main")
    );
}

#[test]
fn root_redirects_by_session() {
    let table = table();
    let kim = user("kim", &[]);
    assert_eq!(resolve("/", &table, Some(&kim)), Resolution::RedirectHome("/main"));
    assert_eq!(resolve("", &table, Some(&kim)), Resolution::RedirectHome("/main"));
    assert_eq!(resolve("/", &table, None), Resolution::RedirectLogin("/Login"));
}

#[test]
fn public_pages_render_without_shell_for_anonymous_user() {
    let table = table();
    assert_eq!(rendered(&resolve("/login", &table, None)), Some(("/Login", None)));
    assert_eq!(
        rendered(&resolve("/mobile/Login", &table, None)),
        Some(("/mobile/Login", None))
    );
    assert_eq!(rendered(&resolve("/JOIN", &table, None)), Some(("/join", None)));
}

#[test]
fn unknown_paths_fall_through_to_catch_all() {
    let table = table();
    let kim = user("kim", &[]);
    assert_eq!(
        resolve("/foo/bar", &table, Some(&kim)),
        Resolution::RedirectHome("/main")
    );
    assert_eq!(resolve("/foo/bar", &table, None), Resolution::RedirectLogin("/Login"));
    assert_eq!(
        resolve("/mobile/unknown", &table, Some(&kim)),
        Resolution::RedirectHome("/mobile/Main")
    );
    assert_eq!(
        resolve("/mobile/unknown", &table, None),
        Resolution::RedirectLogin("/mobile/Login")
    );
}

#[test]
fn redirect_targets_resolve_to_renders() {
    let table = table();
    let kim = user("kim", &[]);
    for target in ["/main", "/mobile/Main"] {
        assert!(rendered(&resolve(target, &table, Some(&kim))).is_some());
    }
    for target in ["/Login", "/mobile/Login"] {
        assert!(rendered(&resolve(target, &table, None)).is_some());
    }
}

#[test]
fn link_check_uses_descriptor_key() {
    let table = table();
    let now = Timestamp::new(0);
    let kim = user("kim", &["mainBoard"]);

    assert_eq!(check_link("/main/boardview?id=2", &table, Some(&kim), now), Ok(()));
    assert_eq!(
        check_link("/main/notice", &table, Some(&kim), now),
        Err(LinkDenied::Forbidden {
            href: "/main/notice".to_string(),
            key: "notice".to_string(),
        })
    );
}

#[test]
fn link_check_derives_key_from_terminal_segment_for_unknown_targets() {
    let table = table();
    let now = Timestamp::new(0);
    let kim = user("kim", &["mainBoard", "reports"]);

    assert_eq!(check_link("/archive/boardWrite", &table, Some(&kim), now), Ok(()));
    assert_eq!(check_link("/main/Reports", &table, Some(&kim), now), Ok(()));
    assert!(check_link("/main/payroll", &table, Some(&kim), now).is_err());
}

#[test]
fn link_check_rejects_invalid_session() {
    let table = table();
    let mut kim = user("kim", &["mainBoard"]);
    kim.expires_at = Some(Timestamp::new(100));

    assert_eq!(
        check_link("/main/board", &table, Some(&kim), Timestamp::new(100)),
        Err(LinkDenied::SessionInvalid)
    );
    assert_eq!(
        check_link("/main/board", &table, None, Timestamp::new(0)),
        Err(LinkDenied::SessionInvalid)
    );
}

#[test]
fn link_check_lets_public_targets_through() {
    let table = table();
    assert_eq!(check_link("/join", &table, None, Timestamp::new(0)), Ok(()));
}
