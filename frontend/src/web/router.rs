//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::guard::{LinkDenied, Resolution, Shell, check_link, resolve};
use super::route::{PageSlot, RouteTable, load_page};
use crate::auth::{SessionContext, now};
use crate::components::feedback::{Loading, PageLoadFailed};
use crate::components::layout::{DesktopLayout, MobileLayout};
use crate::config::AppConfig;
use crate::pages::PageLoader;

/// 单次导航最多跟随的重定向次数
const MAX_REDIRECTS: usize = 4;

/// 获取当前浏览器路径（含查询串）
fn browser_location() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入的会话上下文实现守卫。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前应用内路径（含查询串）
    location: RwSignal<String>,
    table: StoredValue<RouteTable<PageLoader>>,
    session: SessionContext,
    config: StoredValue<AppConfig>,
}

impl RouterService {
    /// 创建新的路由服务，初始路径取自浏览器地址栏
    fn new(table: RouteTable<PageLoader>, session: SessionContext, config: AppConfig) -> Self {
        let initial = config.strip_base(&browser_location());
        Self {
            location: RwSignal::new(initial),
            table: StoredValue::new(table),
            session,
            config: StoredValue::new(config),
        }
    }

    /// 当前路径（跟踪）
    pub fn location(&self) -> String {
        self.location.get()
    }

    /// 当前路径中去掉查询串的部分
    pub fn current_path(&self) -> String {
        self.location
            .with(|l| l.split('?').next().unwrap_or_default().to_string())
    }

    /// 读取当前查询参数
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.location.with(|l| {
            let (_, query) = l.split_once('?')?;
            query.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key == name).then(|| value.to_string())
            })
        })
    }

    /// 为应用内路径生成带基础路径的 href
    pub fn href(&self, path: &str) -> String {
        self.config.with_value(|c| c.with_base(path))
    }

    fn guard(&self, path: &str) -> Resolution {
        self.table
            .with_value(|table| self.session.with_user_untracked(|user| resolve(path, table, user)))
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.apply(path, true);
    }

    /// 以替换方式导航（不留下历史记录）
    pub fn redirect(&self, path: &str) {
        self.apply(path, false);
    }

    /// 执行守卫并跟随重定向
    ///
    /// 发生重定向时始终替换当前历史记录，避免后退回被拦截的路由。
    fn apply(&self, path: &str, use_push: bool) {
        let mut target = path.to_string();
        let mut redirected = false;

        for hop in 0..=MAX_REDIRECTS {
            let Some(next) = self.guard(&target).redirect_target() else {
                break;
            };
            if hop == MAX_REDIRECTS {
                tracing::error!("[Router] Redirect loop while resolving {}", path);
                break;
            }
            tracing::info!("[Router] {} -> {}", target, next);
            target = next.to_string();
            redirected = true;
        }

        let url = self.href(&target);
        if use_push && !redirected {
            push_history_state(&url);
        } else {
            replace_history_state(&url);
        }
        self.location.set(target);
    }

    /// 链接点击：同步复核会话与权限，通过后导航
    ///
    /// 复核失败只取消导航并记录警告；会话失效时清除本地会话，由守卫重定向到登录页。
    pub fn follow_link(&self, href: &str) {
        let checked = self.table.with_value(|table| {
            self.session
                .with_user_untracked(|user| check_link(href, table, user, now()))
        });
        match checked {
            Ok(()) => self.navigate(href),
            Err(LinkDenied::SessionInvalid) => {
                tracing::warn!("[Router] Navigation to {} cancelled: session invalid", href);
                self.session.clear_user();
            }
            Err(denied @ LinkDenied::Forbidden { .. }) => {
                tracing::warn!("[Router] Navigation cancelled: {}", denied);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    ///
    /// 监听器随路由器所在的 Owner 一起释放。
    fn init_popstate_listener(&self) {
        let router = *self;
        let handle = window_event_listener(leptos::ev::popstate, move |_| {
            let path = router.config.with_value(|c| c.strip_base(&browser_location()));
            router.redirect(&path);
        });
        on_cleanup(move || handle.remove());
    }

    /// 会话变化时重新执行守卫（登出后离开受保护页面，登录后离开登录页）
    fn setup_session_redirect(&self) {
        let router = *self;
        let signed_in = self.session.is_signed_in_signal();
        Effect::new(move |_| {
            let _ = signed_in.get();
            let current = router.location.get_untracked();
            router.redirect(&current);
        });
    }

    /// 当前守卫结论（跟踪路径和会话）
    fn resolution(&self) -> Memo<Resolution> {
        let router = *self;
        let signed_in = self.session.is_signed_in_signal();
        Memo::new(move |_| {
            let _ = signed_in.get();
            let path = router.location.get();
            router.guard(&path)
        })
    }

    fn loader_for(&self, path: &str) -> Option<PageLoader> {
        self.table
            .with_value(|table| table.find(path).map(|entry| entry.loader))
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    table: RouteTable<PageLoader>,
    session: SessionContext,
    config: AppConfig,
) -> RouterService {
    let router = RouterService::new(table, session, config);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 启动时构建好的路由表
    table: RouteTable<PageLoader>,
    session: SessionContext,
    config: AppConfig,
    children: Children,
) -> impl IntoView {
    provide_router(table, session, config);

    children()
}

/// 路由出口组件
///
/// 根据守卫结论渲染页面：受保护页面包裹在对应外壳中，重定向时不渲染内容。
#[component]
pub fn RouterOutlet() -> impl IntoView {
    let router = use_router();
    let resolution = router.resolution();

    move || match resolution.get() {
        Resolution::Render { descriptor, shell } => {
            let Some(loader) = router.loader_for(&descriptor.path) else {
                return view! { <PageLoadFailed message=format!("{} 未注册", descriptor.path) /> }
                    .into_any();
            };

            let page = LocalResource::new(move || {
                let descriptor = descriptor.clone();
                async move { load_page(&descriptor, loader()).await }
            });
            let body = move || {
                view! {
                    <Suspense fallback=|| view! { <Loading /> }>
                        {move || {
                            page.get()
                                .map(|slot| match slot {
                                    PageSlot::Ready(component) => component(),
                                    PageSlot::Failed(message) => {
                                        view! { <PageLoadFailed message=message /> }.into_any()
                                    }
                                })
                        }}
                    </Suspense>
                }
            };

            match shell {
                Some(Shell::Desktop) => view! { <DesktopLayout>{body()}</DesktopLayout> }.into_any(),
                Some(Shell::Mobile) => view! { <MobileLayout>{body()}</MobileLayout> }.into_any(),
                None => body().into_any(),
            }
        }
        Resolution::RedirectLogin(_) | Resolution::RedirectHome(_) => view! { <Loading /> }.into_any(),
    }
}

/// 受守卫的站内链接
///
/// 点击时先经 `RouterService::follow_link` 同步复核，复核失败则取消导航。
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = router.href(&to);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.follow_link(&to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
