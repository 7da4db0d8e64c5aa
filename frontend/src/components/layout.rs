//! 布局外壳
//!
//! 桌面端：顶部导航 + 菜单 + 面包屑；移动端：标题栏 + 返回首页。
//! 外壳内所有站内链接都通过 `Link` 回到路由服务复核权限。

use leptos::prelude::*;
use leptos::task::spawn_local;
use officehub_shared::MenuNode;

use crate::auth::use_session;
use crate::config::AppConfig;
use crate::menu::{self, Crumb, MenuIndex, breadcrumbs};
use crate::web::guard::{HOME_PATH, LOGIN_PATH, MOBILE_HOME_PATH, MOBILE_LOGIN_PATH};
use crate::web::router::{Link, use_router};

/// 登出按钮：远端失败也会清除本地会话并跳转
#[component]
fn LogoutButton(
    /// 登出后跳转的登录页
    login_path: &'static str,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let config = expect_context::<AppConfig>();
    let (pending, set_pending) = signal(false);

    let on_logout = move |_| {
        set_pending.set(true);
        let config = config.clone();
        spawn_local(async move {
            session.logout(&config).await;
            router.redirect(login_path);
            set_pending.try_set(false);
        });
    };

    view! {
        <button on:click=on_logout class=class disabled=move || pending.get()>
            "Log out"
        </button>
    }
}

/// 桌面端导航菜单
///
/// 菜单尚未加载完成时显示占位文字。
#[component]
fn NavMenu() -> impl IntoView {
    let session = use_session();

    move || match session.menu() {
        None => view! { <span class="text-sm opacity-60">"Loading menu..."</span> }.into_any(),
        Some(menu) => view! {
            <ul class="menu menu-horizontal px-1">
                {menu.into_iter().map(nav_item).collect_view()}
            </ul>
        }
        .into_any(),
    }
}

fn nav_item(node: MenuNode) -> impl IntoView {
    let label = node.name.clone();
    let children = node.children;
    let entry = match node.url {
        Some(url) => view! { <Link to=url>{label}</Link> }.into_any(),
        None => view! { <span>{label}</span> }.into_any(),
    };

    view! {
        <li>
            {entry}
            {(!children.is_empty()).then(|| view! {
                <ul class="p-2 bg-base-100 z-10">
                    {children
                        .into_iter()
                        .filter_map(|child| {
                            let url = child.url?;
                            let name = child.name;
                            Some(view! { <li><Link to=url>{name}</Link></li> })
                        })
                        .collect_view()}
                </ul>
            })}
        </li>
    }
}

/// 面包屑：最后一项为纯文本
#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let index = expect_context::<StoredValue<MenuIndex>>();

    let crumbs = move || {
        let path = router.current_path();
        match session.menu() {
            Some(menu) => breadcrumbs(&path, &menu),
            None => index.with_value(|i| breadcrumbs(&path, i.desktop())),
        }
    };

    view! {
        <div class="breadcrumbs text-sm">
            <ul>
                {move || crumbs().into_iter().map(crumb_item).collect_view()}
            </ul>
        </div>
    }
}

fn crumb_item(crumb: Crumb) -> impl IntoView {
    let Crumb { name, path, is_last } = crumb;
    match path {
        Some(path) if !is_last => view! { <li><Link to=path>{name}</Link></li> }.into_any(),
        _ => view! { <li><span>{name}</span></li> }.into_any(),
    }
}

/// 桌面端外壳
#[component]
pub fn DesktopLayout(children: Children) -> impl IntoView {
    let session = use_session();
    let user_name = move || session.user().map(|u| u.name).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1 gap-2">
                    <Link to=HOME_PATH class="btn btn-ghost text-xl">"OfficeHub"</Link>
                    <NavMenu />
                </div>
                <div class="flex-none gap-2">
                    <span class="text-sm">{user_name}</span>
                    <LogoutButton login_path=LOGIN_PATH class="btn btn-outline btn-sm" />
                </div>
            </div>
            <div class="max-w-7xl mx-auto p-4 space-y-4">
                <Breadcrumbs />
                {children()}
            </div>
        </div>
    }
}

/// 移动端外壳
#[component]
pub fn MobileLayout(children: Children) -> impl IntoView {
    let router = use_router();
    let index = expect_context::<StoredValue<MenuIndex>>();

    let title = move || {
        let path = router.current_path();
        index.with_value(|i| {
            menu::find_by_url(i.mobile(), &path)
                .map(|n| n.name.clone())
                .unwrap_or_else(|| "OfficeHub".to_string())
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <div class="navbar bg-primary text-primary-content">
                <div class="flex-none">
                    <Link to=MOBILE_HOME_PATH class="btn btn-ghost btn-sm">"Home"</Link>
                </div>
                <div class="flex-1 justify-center font-bold">{title}</div>
                <div class="flex-none">
                    <LogoutButton login_path=MOBILE_LOGIN_PATH class="btn btn-ghost btn-sm" />
                </div>
            </div>
            <main class="flex-1 p-3">{children()}</main>
        </div>
    }
}
