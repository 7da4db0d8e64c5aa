use super::*;
use crate::session::tests::{MemoryStorage, node, user};
use async_trait::async_trait;
use officehub_shared::Notice;
use officehub_shared::protocol::{CreateNoticeRequest, JoinRequest};
use std::cell::RefCell;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct MockBackend {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    fail_logout: bool,
    fail_menu: bool,
}

impl MockBackend {
    fn push_log(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }
}

#[async_trait(?Send)]
impl PortalBackend for MockBackend {
    async fn login(&self, request: LoginRequest) -> PortalResult<User> {
        self.push_log(format!("login:{}", request.id));
        if request.password == "secret" {
            Ok(user(&request.id, &["mainBoard"]))
        } else {
            Err(PortalError::Rejected("bad credentials".to_string()))
        }
    }

    async fn join(&self, request: JoinRequest) -> PortalResult<()> {
        self.push_log(format!("join:{}", request.id));
        Ok(())
    }

    async fn fetch_menu(&self, user_id: &str) -> PortalResult<Vec<MenuNode>> {
        self.push_log(format!("menu:{}", user_id));
        if self.fail_menu {
            Err(PortalError::Status(500))
        } else {
            Ok(vec![node("a", "A", Some("/main/a"), vec![])])
        }
    }

    async fn logout(&self) -> PortalResult<()> {
        self.push_log("logout".to_string());
        if self.fail_logout {
            Err(PortalError::Network("offline".to_string()))
        } else {
            Ok(())
        }
    }

    async fn notices(&self) -> PortalResult<Vec<Notice>> {
        Ok(Vec::new())
    }

    async fn create_notice(&self, _request: CreateNoticeRequest) -> PortalResult<Notice> {
        Err(PortalError::EmptyPayload)
    }
}

fn signed_in_store() -> RefCell<SessionStore<MemoryStorage>> {
    let mut store = SessionStore::restore(MemoryStorage::default());
    store.set_user(user("kim", &["mainBoard"]));
    store.set_menu(vec![node("a", "A", Some("/main/a"), vec![])]);
    RefCell::new(store)
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn logout_clears_user_and_menu_together() {
    let backend = MockBackend::default();
    let store = signed_in_store();

    sign_out(&backend, || store.borrow_mut().clear_user()).await;

    assert!(store.borrow().user().is_none());
    assert!(store.borrow().menu().is_none());
    assert_eq!(*backend.log.borrow(), vec!["logout"]);
}

#[tokio::test]
async fn logout_clears_local_session_even_when_remote_fails() {
    let backend = MockBackend {
        fail_logout: true,
        ..Default::default()
    };
    let store = signed_in_store();

    sign_out(&backend, || store.borrow_mut().clear_user()).await;

    assert!(!store.borrow().is_signed_in());
    assert!(store.borrow().menu().is_none());
}

#[tokio::test]
async fn menu_failure_leaves_menu_absent() {
    let backend = MockBackend {
        fail_menu: true,
        ..Default::default()
    };
    assert_eq!(load_menu(&backend, "kim").await, None);

    let backend = MockBackend::default();
    let menu = load_menu(&backend, "kim").await.unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(*backend.log.borrow(), vec!["menu:kim"]);
}

#[tokio::test]
async fn sign_in_rejects_blank_credentials_without_calling_backend() {
    let backend = MockBackend::default();

    let err = sign_in(&backend, "  ", "secret").await.unwrap_err();
    assert!(matches!(err, PortalError::Rejected(_)));
    assert!(backend.log.borrow().is_empty());
}

#[tokio::test]
async fn sign_in_then_menu_populates_session() {
    let backend = MockBackend::default();
    let mut store = SessionStore::restore(MemoryStorage::default());

    let kim = sign_in(&backend, " kim ", "secret").await.unwrap();
    store.set_user(kim);
    let menu = load_menu(&backend, "kim").await.unwrap();
    assert!(store.set_menu_for("kim", menu));

    assert_eq!(store.user().map(|u| u.id.as_str()), Some("kim"));
    assert!(store.menu().is_some());
    assert_eq!(*backend.log.borrow(), vec!["login:kim", "menu:kim"]);
}

#[tokio::test]
async fn sign_in_surfaces_backend_rejection() {
    let backend = MockBackend::default();
    let err = sign_in(&backend, "kim", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "请求被拒绝: bad credentials");
}
