//! 认证模块
//!
//! `SessionContext` 把会话存储放进 Leptos 信号，通过 Context 注入路由服务和布局外壳；
//! 登录、登出、菜单加载等异步流程写成与 `PortalBackend` 解耦的函数。

use leptos::prelude::*;
use leptos::task::spawn_local;
use officehub_shared::protocol::LoginRequest;
use officehub_shared::{MenuNode, Timestamp, User};

use crate::api::{PortalApi, PortalBackend};
use crate::config::AppConfig;
use crate::error::{PortalError, PortalResult};
use crate::session::SessionStore;
use crate::web::BrowserSessionStorage;

/// 当前时间
pub fn now() -> Timestamp {
    Timestamp::new(js_sys::Date::now() as i64)
}

// =========================================================
// 异步流程 (与 UI 解耦)
// =========================================================

/// 登录：校验输入并调用后端
pub async fn sign_in<B: PortalBackend>(backend: &B, id: &str, password: &str) -> PortalResult<User> {
    let id = id.trim();
    if id.is_empty() || password.is_empty() {
        return Err(PortalError::Rejected("请输入账号和密码".to_string()));
    }
    let user = backend
        .login(LoginRequest {
            id: id.to_string(),
            password: password.to_string(),
        })
        .await?;
    tracing::info!("[Auth] Login succeeded for {}", user.id);
    Ok(user)
}

/// 加载菜单；失败时记录日志并返回 `None`（导航保持“菜单加载中”）
pub async fn load_menu<B: PortalBackend>(backend: &B, user_id: &str) -> Option<Vec<MenuNode>> {
    match backend.fetch_menu(user_id).await {
        Ok(menu) => Some(menu),
        Err(e) => {
            tracing::warn!("[Auth] Menu fetch failed for {}: {}", user_id, e);
            None
        }
    }
}

/// 登出：无论远端调用是否成功，本地会话都会被清除
pub async fn sign_out<B: PortalBackend>(backend: &B, clear_local: impl FnOnce()) {
    if let Err(e) = backend.logout().await {
        tracing::warn!("[Auth] Remote logout failed, clearing local session anyway: {}", e);
    }
    clear_local();
}

// =========================================================
// 会话上下文
// =========================================================

/// 会话上下文
///
/// `Copy` 句柄，内部是会话存储信号和“检查中”标志。
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: RwSignal<SessionStore<BrowserSessionStorage>>,
    checking: RwSignal<bool>,
}

impl SessionContext {
    /// 从 sessionStorage 恢复会话
    pub fn new() -> Self {
        Self {
            store: RwSignal::new(SessionStore::restore(BrowserSessionStorage)),
            checking: RwSignal::new(true),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.store.with(|s| s.user().cloned())
    }

    pub fn menu(&self) -> Option<Vec<MenuNode>> {
        self.store.with(|s| s.menu().map(<[MenuNode]>::to_vec))
    }

    pub fn with_user_untracked<R>(&self, f: impl FnOnce(Option<&User>) -> R) -> R {
        self.store.with_untracked(|s| f(s.user()))
    }

    /// 登录状态信号（用于路由服务注入）
    pub fn is_signed_in_signal(&self) -> Signal<bool> {
        let store = self.store;
        Signal::derive(move || store.with(|s| s.is_signed_in()))
    }

    /// 会话有效性检查是否尚未完成
    pub fn is_checking(&self) -> bool {
        self.checking.get()
    }

    pub fn set_user(&self, user: User) {
        self.store.try_update(|s| s.set_user(user));
    }

    pub fn clear_user(&self) {
        self.store.try_update(|s| s.clear_user());
    }

    /// 仅当用户未变时写入菜单；上下文已销毁时静默忽略
    pub fn set_menu_for(&self, user_id: &str, menu: Vec<MenuNode>) {
        self.store.try_update(|s| s.set_menu_for(user_id, menu));
    }

    /// 为当前用户构建带令牌的 API 客户端
    pub fn api(&self, config: &AppConfig) -> PortalApi {
        let api = PortalApi::new(config);
        match self.with_user_untracked(|u| u.map(|u| u.token.clone())) {
            Some(token) => api.with_token(token),
            None => api,
        }
    }

    /// 菜单请求失败时清除当前用户的菜单
    pub fn reject_menu_for(&self, user_id: &str) {
        self.store.try_update(|s| s.reject_menu_for(user_id));
    }

    /// 若已登录且菜单尚未就绪，后台加载菜单
    pub fn refresh_menu(&self, config: &AppConfig) {
        let pending = self.store.with_untracked(|s| match (s.user(), s.menu()) {
            (Some(user), None) => Some(user.id.clone()),
            _ => None,
        });
        let Some(user_id) = pending else {
            return;
        };

        let ctx = *self;
        let api = self.api(config);
        spawn_local(async move {
            match load_menu(&api, &user_id).await {
                Some(menu) => ctx.set_menu_for(&user_id, menu),
                None => ctx.reject_menu_for(&user_id),
            }
        });
    }

    /// 登出并清除本地会话
    pub async fn logout(&self, config: &AppConfig) {
        let ctx = *self;
        let api = self.api(config);
        sign_out(&api, move || ctx.clear_user()).await;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// 初始化会话
///
/// 本地有效性检查与菜单加载相互独立：前者同步完成并结束“检查中”状态，
/// 后者在后台进行，只影响依赖菜单的导航项。
pub fn init_session(ctx: &SessionContext, config: &AppConfig) {
    let expired = ctx.with_user_untracked(|u| u.is_some_and(|u| !u.is_valid_at(now())));
    if expired {
        tracing::info!("[Auth] Stored session expired, signing out locally");
        ctx.clear_user();
    }
    ctx.checking.set(false);
    ctx.refresh_menu(config);
}

#[cfg(test)]
mod tests;
