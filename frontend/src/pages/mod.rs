//! 页面清单
//!
//! 以静态清单代替模块扫描：每个页面模块路径对应一个异步加载器。
//! 路由表在启动时从 `manifest()` 构建一次。

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use crate::web::route::PageLoadError;

mod board;
mod home;
mod login;
mod meeting_room;
mod mobile;

/// 已解析的页面渲染函数
pub type PageComponent = fn() -> AnyView;
/// 页面加载器
pub type PageLoader = fn() -> LocalBoxFuture<'static, Result<PageComponent, PageLoadError>>;

macro_rules! page {
    ($component:path) => {{
        fn render() -> AnyView {
            $component().into_any()
        }
        fn load() -> LocalBoxFuture<'static, Result<PageComponent, PageLoadError>> {
            async { Ok::<_, PageLoadError>(render as PageComponent) }.boxed_local()
        }
        load as PageLoader
    }};
}

/// 页面模块清单（页面根为 `pages/`）
pub fn manifest() -> Vec<(&'static str, PageLoader)> {
    vec![
        ("pages/Login", page!(login::LoginPage)),
        ("pages/Join", page!(login::JoinPage)),
        ("pages/main/MainHome", page!(home::MainHomePage)),
        ("pages/main/Board", page!(board::BoardPage)),
        ("pages/main/BoardView", page!(board::BoardViewPage)),
        ("pages/main/BoardWrite", page!(board::BoardWritePage)),
        ("pages/main/Notice", page!(board::NoticePage)),
        ("pages/main/MeetingRoom", page!(meeting_room::MeetingRoomPage)),
        ("pages/mobile/MobileLogin", page!(login::MobileLoginPage)),
        ("pages/mobile/MobileMain", page!(mobile::MobileMainPage)),
        ("pages/mobile/carReservation", page!(mobile::CarReservationPage)),
        ("pages/mobile/notice", page!(mobile::MobileNoticePage)),
    ]
}
