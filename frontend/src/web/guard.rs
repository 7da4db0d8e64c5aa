//! 路由守卫
//!
//! 每次导航时根据会话状态决定：渲染页面、重定向到登录页、或重定向到首页。
//! 另外提供链接点击前的同步复核（会话有效性 + 权限键）。

use officehub_shared::{Timestamp, User};
use thiserror::Error;

use super::route::{MOBILE_PREFIX, RouteDescriptor, RouteTable, normalize_path};
use crate::menu::{has_permission, permission_key_for};

pub const LOGIN_PATH: &str = "/Login";
pub const MOBILE_LOGIN_PATH: &str = "/mobile/Login";
pub const HOME_PATH: &str = "/main";
pub const MOBILE_HOME_PATH: &str = "/mobile/Main";

/// 页面外壳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Desktop,
    Mobile,
}

/// 守卫结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 渲染页面；公开页面不带外壳
    Render {
        descriptor: RouteDescriptor,
        shell: Option<Shell>,
    },
    RedirectLogin(&'static str),
    RedirectHome(&'static str),
}

impl Resolution {
    /// 重定向目标路径
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Resolution::Render { .. } => None,
            Resolution::RedirectLogin(to) | Resolution::RedirectHome(to) => Some(to),
        }
    }
}

fn login_for(normalized: &str) -> &'static str {
    if normalized.starts_with(MOBILE_PREFIX) {
        MOBILE_LOGIN_PATH
    } else {
        LOGIN_PATH
    }
}

fn home_for(normalized: &str) -> &'static str {
    if normalized.starts_with(MOBILE_PREFIX) {
        MOBILE_HOME_PATH
    } else {
        HOME_PATH
    }
}

/// **核心守卫逻辑**
///
/// 规则按顺序求值（路径已规范化为小写）：
/// 1. 根路径且已登录 -> 首页
/// 2. `/mobile/login` 且已登录 -> 移动端首页
/// 3. `/login` 且已登录 -> 首页
/// 4. 公开页面：已登录 -> 对应首页；未登录 -> 渲染
/// 5. 受保护页面：未登录 -> 对应登录页；已登录 -> 在对应外壳中渲染
/// 6. 未知路径：按登录状态和移动端前缀重定向
pub fn resolve<L>(path: &str, table: &RouteTable<L>, user: Option<&User>) -> Resolution {
    let normalized = normalize_path(path);
    let signed_in = user.is_some();

    if signed_in {
        match normalized.as_str() {
            "/" => return Resolution::RedirectHome(HOME_PATH),
            "/mobile/login" => return Resolution::RedirectHome(MOBILE_HOME_PATH),
            "/login" => return Resolution::RedirectHome(HOME_PATH),
            _ => {}
        }
    }

    let Some(entry) = table.find(&normalized) else {
        return if signed_in {
            Resolution::RedirectHome(home_for(&normalized))
        } else {
            Resolution::RedirectLogin(login_for(&normalized))
        };
    };
    let descriptor = &entry.descriptor;

    match (descriptor.is_public, signed_in) {
        (true, true) => {
            let home = if descriptor.path.eq_ignore_ascii_case(MOBILE_LOGIN_PATH) {
                MOBILE_HOME_PATH
            } else {
                HOME_PATH
            };
            Resolution::RedirectHome(home)
        }
        (true, false) => Resolution::Render {
            descriptor: descriptor.clone(),
            shell: None,
        },
        (false, false) => Resolution::RedirectLogin(login_for(&normalized)),
        (false, true) => Resolution::Render {
            descriptor: descriptor.clone(),
            shell: Some(if descriptor.is_mobile() {
                Shell::Mobile
            } else {
                Shell::Desktop
            }),
        },
    }
}

// =========================================================
// 链接复核
// =========================================================

/// 链接导航被取消的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkDenied {
    #[error("会话无效或已过期")]
    SessionInvalid,
    #[error("无权访问 {href} (权限键 {key})")]
    Forbidden { href: String, key: String },
}

/// 链接点击前的同步复核
///
/// 公开页面直接放行；否则依次检查本地会话有效性和目标页面的权限键。
/// 目标在路由表中时使用描述符的权限键，否则由路径末段推导。
pub fn check_link<L>(
    href: &str,
    table: &RouteTable<L>,
    user: Option<&User>,
    now: Timestamp,
) -> Result<(), LinkDenied> {
    let target = table.find(href).map(|e| &e.descriptor);
    if target.is_some_and(|d| d.is_public) {
        return Ok(());
    }

    let user = user
        .filter(|u| u.is_valid_at(now))
        .ok_or(LinkDenied::SessionInvalid)?;

    let key = match target {
        Some(d) => d.permission_key.clone(),
        None => {
            let normalized = normalize_path(href);
            let terminal = normalized.rsplit('/').next().unwrap_or_default();
            Some(permission_key_for(terminal))
        }
    };

    if has_permission(Some(user.auth.as_slice()), key.as_deref()) {
        Ok(())
    } else {
        Err(LinkDenied::Forbidden {
            href: href.to_string(),
            key: key.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests;
