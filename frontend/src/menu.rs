//! 菜单 / 权限索引
//!
//! 静态菜单树同时用于渲染导航和判断用户能否访问某个页面：
//! - `has_permission`: 权限键检查
//! - `breadcrumbs`: 根据当前路径和菜单树生成面包屑
//! - `MenuIndex`: 内嵌的静态菜单文档（桌面树 + 移动端快捷入口）

use officehub_shared::{BOARD_PERMISSION_KEY, MenuFixture, MenuNode};

const MENU_FIXTURE: &str = include_str!("../assets/menu.json");

/// 面包屑首项
pub const HOME_LABEL: &str = "Home";
pub const HOME_PATH: &str = "/main";

/// 共享同一权限的看板类页面
const BOARD_FAMILY: [&str; 3] = ["board", "boardview", "boardwrite"];

/// 由页面名推导权限键：小写页面名，看板类页面统一映射为 `mainBoard`
pub fn permission_key_for(name: &str) -> String {
    let lower = name.to_lowercase();
    if BOARD_FAMILY.contains(&lower.as_str()) {
        BOARD_PERMISSION_KEY.to_string()
    } else {
        lower
    }
}

/// 权限检查
///
/// `key` 为空表示无需权限；授权集合缺失视为空集合。
pub fn has_permission(auth: Option<&[String]>, key: Option<&str>) -> bool {
    match key {
        None => true,
        Some(key) if key.is_empty() => true,
        Some(key) => auth.is_some_and(|set| set.iter().any(|k| k == key)),
    }
}

/// 面包屑项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    /// 分组节点没有链接
    pub path: Option<String>,
    /// 最后一项渲染为纯文本
    pub is_last: bool,
}

/// 生成面包屑
///
/// 逐段累积路径前缀，对每个前缀在顶层节点中查找：
/// 1. 节点 `url` 等于前缀，直接加入；
/// 2. 否则子节点 `url` 等于前缀，先加入父节点（位于父节点自己的路径），再加入子节点。
///
/// 未匹配的前缀跳过，已存在的项不重复加入。
pub fn breadcrumbs(path: &str, menu: &[MenuNode]) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        name: HOME_LABEL.to_string(),
        path: Some(HOME_PATH.to_string()),
        is_last: false,
    }];

    let mut prefix = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        if prefix.eq_ignore_ascii_case(HOME_PATH) {
            continue;
        }

        for top in menu {
            if url_matches(top, &prefix) {
                push_unique(&mut crumbs, &top.name, top.url.clone());
                break;
            }
            if let Some(child) = top.children.iter().find(|c| url_matches(c, &prefix)) {
                push_unique(&mut crumbs, &top.name, top.url.clone());
                push_unique(&mut crumbs, &child.name, child.url.clone());
                break;
            }
        }
    }

    if let Some(last) = crumbs.last_mut() {
        last.is_last = true;
    }
    crumbs
}

fn url_matches(node: &MenuNode, prefix: &str) -> bool {
    node.url
        .as_deref()
        .is_some_and(|url| url.eq_ignore_ascii_case(prefix))
}

fn push_unique(crumbs: &mut Vec<Crumb>, name: &str, path: Option<String>) {
    if crumbs.iter().any(|c| c.name == name && c.path == path) {
        return;
    }
    crumbs.push(Crumb {
        name: name.to_string(),
        path,
        is_last: false,
    });
}

/// 在整棵菜单树中按 url 查找节点
pub fn find_by_url<'a>(menu: &'a [MenuNode], url: &str) -> Option<&'a MenuNode> {
    menu.iter().find_map(|node| {
        if url_matches(node, url) {
            Some(node)
        } else {
            find_by_url(&node.children, url)
        }
    })
}

/// 静态菜单索引
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuIndex {
    fixture: MenuFixture,
}

impl MenuIndex {
    /// 加载内嵌的菜单文档
    pub fn load() -> Self {
        Self::from_json(MENU_FIXTURE)
    }

    /// 解析菜单文档；格式错误时返回空索引
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<MenuFixture>(json) {
            Ok(fixture) => Self { fixture },
            Err(e) => {
                tracing::error!("[Menu] Invalid menu fixture: {}", e);
                Self::default()
            }
        }
    }

    /// 桌面端菜单树
    pub fn desktop(&self) -> &[MenuNode] {
        &self.fixture.desktop
    }

    /// 移动端快捷入口（扁平列表）
    pub fn mobile(&self) -> &[MenuNode] {
        &self.fixture.mobile
    }
}

#[cfg(test)]
mod tests;
