//! OfficeHub 门户前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由表构建（领域模型）
//! - `web::guard`: 路由守卫与链接复核
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话存储与认证流程
//! - `menu`: 菜单 / 权限索引与面包屑
//! - `components` / `pages`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod feedback;
    pub mod layout;
}
mod config;
mod error;
pub mod logging;
mod menu;
mod pages;
mod session;

// 浏览器 API 与路由模块
pub(crate) mod web {
    pub mod guard;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::BrowserSessionStorage;
}

pub use config::AppConfig;

use crate::auth::{SessionContext, init_session};
use crate::components::feedback::{Loading, PageLoadFailed};
use crate::menu::MenuIndex;
use crate::web::route::RouteTable;
use crate::web::router::{Router, RouterOutlet};

use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与静态菜单
    let config = AppConfig::from_env();
    provide_context(config.clone());
    provide_context(StoredValue::new(MenuIndex::load()));

    // 2. 会话上下文（从 sessionStorage 恢复）
    let session = SessionContext::new();
    provide_context(session);
    init_session(&session, &config);

    // 3. 路由表只在启动时构建一次
    let table = match RouteTable::build(pages::manifest()) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("[App] Route table could not be built: {}", e);
            return view! { <PageLoadFailed message=e.to_string() /> }.into_any();
        }
    };
    tracing::info!("[App] {} routes registered", table.len());

    view! {
        <Show when=move || !session.is_checking() fallback=|| view! { <Loading /> }>
            {
                let table = table.clone();
                let config = config.clone();
                view! {
                    <Router table=table session=session config=config>
                        <RouterOutlet />
                    </Router>
                }
            }
        </Show>
    }
    .into_any()
}
