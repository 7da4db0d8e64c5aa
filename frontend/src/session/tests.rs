use super::*;
use crate::error::PortalError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

/// In-memory stand-in for `sessionStorage`, shared between clones.
#[derive(Clone, Default)]
pub(crate) struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemoryStorage {
    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub(crate) fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn fail_writes(&self) {
        *self.fail_writes.borrow_mut() = true;
    }
}

impl KeyValueStore for MemoryStorage {
    fn load(&self, key: &str) -> PortalResult<Option<Session>> {
        match self.raw(key) {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PortalError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, session: &Session) -> PortalResult<()> {
        if *self.fail_writes.borrow() {
            return Err(PortalError::Storage("quota exceeded".to_string()));
        }
        let raw = serde_json::to_string(session).map_err(|e| PortalError::Storage(e.to_string()))?;
        self.put_raw(key, &raw);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub(crate) fn user(id: &str, auth: &[&str]) -> User {
    User {
        id: id.to_string(),
        name: id.to_uppercase(),
        token: format!("token-{}", id),
        auth: auth.iter().map(|a| a.to_string()).collect(),
        expires_at: None,
    }
}

pub(crate) fn node(id: &str, name: &str, url: Option<&str>, children: Vec<MenuNode>) -> MenuNode {
    MenuNode {
        id: id.to_string(),
        name: name.to_string(),
        url: url.map(str::to_string),
        children,
    }
}

// =========================================================
// Tests
// =========================================================

#[test]
fn starts_empty_without_stored_session() {
    let store = SessionStore::restore(MemoryStorage::default());
    assert!(!store.is_signed_in());
    assert!(store.menu().is_none());
}

#[test]
fn session_survives_reload_through_storage() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.set_user(user("kim", &["mainBoard"]));
    store.set_menu(vec![node("a", "A", Some("/main/a"), vec![])]);

    let reloaded = SessionStore::restore(storage.clone());
    assert_eq!(reloaded.session(), store.session());
    assert!(storage.raw(SESSION_STORAGE_KEY).is_some());
}

#[test]
fn clear_user_wipes_menu_and_storage() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.set_user(user("kim", &[]));
    store.set_menu(vec![]);

    store.clear_user();

    assert!(store.user().is_none());
    assert!(store.menu().is_none());
    assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn menu_requires_a_user() {
    let mut store = SessionStore::restore(MemoryStorage::default());
    store.set_menu(vec![node("a", "A", None, vec![])]);
    assert!(store.menu().is_none());
}

#[test]
fn stale_menu_result_is_dropped_after_logout() {
    let mut store = SessionStore::restore(MemoryStorage::default());
    store.set_user(user("kim", &[]));
    store.clear_user();

    assert!(!store.set_menu_for("kim", vec![]));
    assert!(store.menu().is_none());
}

#[test]
fn stale_menu_result_is_dropped_after_user_switch() {
    let mut store = SessionStore::restore(MemoryStorage::default());
    store.set_user(user("kim", &[]));
    store.set_user(user("lee", &[]));

    assert!(!store.set_menu_for("kim", vec![]));
    assert!(store.set_menu_for("lee", vec![]));
    assert_eq!(store.menu(), Some(&[][..]));
}

#[test]
fn switching_user_drops_previous_menu() {
    let mut store = SessionStore::restore(MemoryStorage::default());
    store.set_user(user("kim", &[]));
    store.set_menu(vec![node("a", "A", Some("/main/a"), vec![])]);

    store.set_user(user("kim", &["notice"]));
    assert!(store.menu().is_some());

    store.set_user(user("lee", &[]));
    assert!(store.menu().is_none());
}

#[test]
fn corrupt_storage_is_discarded() {
    let storage = MemoryStorage::default();
    storage.put_raw(SESSION_STORAGE_KEY, "{not json");

    let store = SessionStore::restore(storage.clone());
    assert!(!store.is_signed_in());
    assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn orphan_menu_is_not_restored() {
    let storage = MemoryStorage::default();
    storage.put_raw(
        SESSION_STORAGE_KEY,
        r#"{"user":null,"menu":[{"id":"a","name":"A","url":"/main/a"}]}"#,
    );

    let store = SessionStore::restore(storage);
    assert!(store.menu().is_none());
}

#[test]
fn write_failure_keeps_in_memory_session() {
    let storage = MemoryStorage::default();
    storage.fail_writes();
    let mut store = SessionStore::restore(storage.clone());

    store.set_user(user("kim", &[]));

    assert!(store.is_signed_in());
    assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
}

#[test]
fn rejected_menu_clears_only_current_user() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.set_user(user("kim", &[]));
    store.set_menu(vec![node("a", "A", Some("/main/a"), vec![])]);

    assert!(!store.reject_menu_for("lee"));
    assert!(store.menu().is_some());

    assert!(store.reject_menu_for("kim"));
    assert!(store.is_signed_in());
    assert!(store.menu().is_none());
    assert!(SessionStore::restore(storage).menu().is_none());
}

#[test]
fn clear_menu_keeps_user() {
    let storage = MemoryStorage::default();
    let mut store = SessionStore::restore(storage.clone());
    store.set_user(user("kim", &[]));
    store.set_menu(vec![node("a", "A", Some("/main/a"), vec![])]);

    store.clear_menu();

    assert!(store.is_signed_in());
    assert!(store.menu().is_none());
    let reloaded = SessionStore::restore(storage);
    assert!(reloaded.is_signed_in());
    assert!(reloaded.menu().is_none());
}
