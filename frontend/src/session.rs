//! 会话存储
//!
//! 保存当前用户及其菜单 / 权限树，并持久化到会话级键值存储
//! （浏览器中为 `sessionStorage`，关闭标签页即清除）。
//! 所有修改都通过 `set_user` / `clear_user` / `set_menu` / `clear_menu` 完成，
//! 每次修改整体替换字段并立即持久化。

use officehub_shared::{MenuNode, SESSION_STORAGE_KEY, User};
use serde::{Deserialize, Serialize};

use crate::error::PortalResult;

/// 持久化的会话数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub menu: Option<Vec<MenuNode>>,
}

/// 会话级键值存储抽象
pub trait KeyValueStore {
    fn load(&self, key: &str) -> PortalResult<Option<Session>>;
    fn save(&self, key: &str, session: &Session) -> PortalResult<()>;
    fn remove(&self, key: &str);
}

/// 会话存储
#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    session: Session,
    storage: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// 从存储中恢复会话；存储不可读时以空会话启动
    pub fn restore(storage: K) -> Self {
        let session = match storage.load(SESSION_STORAGE_KEY) {
            Ok(Some(session)) => sanitize(session),
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!("[Session] Failed to restore session: {}", e);
                storage.remove(SESSION_STORAGE_KEY);
                Session::default()
            }
        };
        Self { session, storage }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn menu(&self) -> Option<&[MenuNode]> {
        self.session.menu.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.user.is_some()
    }

    /// 设置用户。切换到另一个用户时旧菜单一并作废。
    pub fn set_user(&mut self, user: User) {
        let same_user = self.user().is_some_and(|u| u.id == user.id);
        if !same_user {
            self.session.menu = None;
        }
        tracing::info!("[Session] User signed in: {}", user.id);
        self.session.user = Some(user);
        self.persist();
    }

    /// 清除用户，菜单随之清除
    pub fn clear_user(&mut self) {
        if let Some(user) = self.session.user.take() {
            tracing::info!("[Session] User signed out: {}", user.id);
        }
        self.session.menu = None;
        self.storage.remove(SESSION_STORAGE_KEY);
    }

    /// 设置菜单；未登录时忽略
    pub fn set_menu(&mut self, menu: Vec<MenuNode>) {
        if self.session.user.is_none() {
            tracing::debug!("[Session] Ignoring menu without a signed-in user");
            return;
        }
        self.session.menu = Some(menu);
        self.persist();
    }

    /// 仅当 `user_id` 仍是当前用户时设置菜单
    ///
    /// 菜单请求完成前用户可能已登出或切换，此时结果作废。
    /// 返回是否已应用。
    pub fn set_menu_for(&mut self, user_id: &str, menu: Vec<MenuNode>) -> bool {
        if self.user().is_some_and(|u| u.id == user_id) {
            self.set_menu(menu);
            true
        } else {
            tracing::debug!("[Session] Dropping stale menu for {}", user_id);
            false
        }
    }

    /// 当前用户的菜单请求被拒绝时丢弃已有菜单，导航回到“加载中”
    ///
    /// 用户已变化时不做任何修改。返回是否已清除。
    pub fn reject_menu_for(&mut self, user_id: &str) -> bool {
        if self.user().is_some_and(|u| u.id == user_id) {
            self.clear_menu();
            true
        } else {
            false
        }
    }

    pub fn clear_menu(&mut self) {
        self.session.menu = None;
        self.persist();
    }

    fn persist(&self) {
        if self.session == Session::default() {
            self.storage.remove(SESSION_STORAGE_KEY);
            return;
        }
        if let Err(e) = self.storage.save(SESSION_STORAGE_KEY, &self.session) {
            tracing::warn!("[Session] Failed to persist session: {}", e);
        }
    }
}

/// 菜单只能与用户同时存在
fn sanitize(mut session: Session) -> Session {
    if session.user.is_none() {
        session.menu = None;
    }
    session
}

#[cfg(test)]
pub(crate) mod tests;
