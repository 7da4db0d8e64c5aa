//! 路由定义模块 - 路由表构建
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 启动时扫描页面清单，为每个页面模块推导出规范的 URL 路径和访问分类，
//! 生成只读的路由表。

use std::fmt::{self, Display};

use thiserror::Error;

use crate::menu::permission_key_for;

/// 页面模块根路径
pub const PAGES_ROOT: &str = "pages/";
/// 移动端路由前缀（小写）
pub const MOBILE_PREFIX: &str = "/mobile/";

/// 路由描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// 规范 URL 路径（保留显示用的大小写）
    pub path: String,
    /// 页面模块相对于页面根的路径，如 `mobile/MobileLogin`
    pub module: String,
    /// 模块名（相对路径的最后一段）
    pub name: String,
    /// 是否无需登录即可访问（仅登录 / 注册类页面）
    pub is_public: bool,
    /// 权限键，公开路由为 `None`
    pub permission_key: Option<String>,
}

impl RouteDescriptor {
    /// 是否属于移动端命名空间
    pub fn is_mobile(&self) -> bool {
        is_mobile_path(&self.path)
    }
}

impl Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.module)
    }
}

// =========================================================
// 路径推导规则
// =========================================================

/// 规则输入：相对路径及其小写形式
pub struct RuleInput<'a> {
    pub relative: &'a str,
    pub relative_lower: String,
    pub name_lower: String,
}

impl<'a> RuleInput<'a> {
    fn new(relative: &'a str) -> Self {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        Self {
            relative,
            relative_lower: relative.to_lowercase(),
            name_lower: name.to_lowercase(),
        }
    }
}

/// 路径推导规则：(谓词, 变换)，按顺序求值，首个匹配生效
pub struct RouteRule {
    pub name: &'static str,
    pub matches: fn(&RuleInput) -> bool,
    pub path: fn(&RuleInput) -> String,
    /// 命中此规则的页面为公开页面
    pub public: bool,
}

pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        name: "mobile-login",
        matches: is_mobile_login,
        path: mobile_login_path,
        public: true,
    },
    RouteRule {
        name: "mobile-main",
        matches: is_mobile_main,
        path: mobile_main_path,
        public: false,
    },
    RouteRule {
        name: "login",
        matches: is_login,
        path: login_path,
        public: true,
    },
    RouteRule {
        name: "join",
        matches: is_join,
        path: join_path,
        public: true,
    },
    RouteRule {
        name: "main-home",
        matches: is_main_home,
        path: main_home_path,
        public: false,
    },
    RouteRule {
        name: "mobile",
        matches: is_mobile_module,
        path: mobile_module_path,
        public: false,
    },
    RouteRule {
        name: "default",
        matches: always,
        path: lowercase_path,
        public: false,
    },
];

fn is_mobile_login(r: &RuleInput) -> bool {
    r.relative_lower == "mobile/mobilelogin"
}

fn mobile_login_path(_: &RuleInput) -> String {
    "/mobile/Login".to_string()
}

fn is_mobile_main(r: &RuleInput) -> bool {
    r.relative_lower == "mobile/mobilemain"
}

fn mobile_main_path(_: &RuleInput) -> String {
    "/mobile/Main".to_string()
}

fn is_login(r: &RuleInput) -> bool {
    r.name_lower == "login"
}

fn login_path(_: &RuleInput) -> String {
    "/Login".to_string()
}

fn is_join(r: &RuleInput) -> bool {
    r.name_lower == "join"
}

fn join_path(_: &RuleInput) -> String {
    "/join".to_string()
}

fn is_main_home(r: &RuleInput) -> bool {
    r.name_lower == "mainhome"
}

fn main_home_path(_: &RuleInput) -> String {
    "/main".to_string()
}

fn is_mobile_module(r: &RuleInput) -> bool {
    r.relative_lower.starts_with("mobile/")
}

fn mobile_module_path(r: &RuleInput) -> String {
    let rest = r.relative.get("mobile/".len()..).unwrap_or_default();
    format!("/mobile/{}", upper_first(rest))
}

fn always(_: &RuleInput) -> bool {
    true
}

fn lowercase_path(r: &RuleInput) -> String {
    format!("/{}", r.relative_lower)
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 从页面模块的相对路径推导路由描述符
pub fn derive_route(relative: &str) -> RouteDescriptor {
    let input = RuleInput::new(relative);
    let rule = ROUTE_RULES
        .iter()
        .find(|rule| (rule.matches)(&input))
        .unwrap_or(&ROUTE_RULES[ROUTE_RULES.len() - 1]);

    let name = relative.rsplit('/').next().unwrap_or(relative).to_string();
    let is_public = rule.public || input.name_lower == "login" || input.name_lower == "join";
    let permission_key = (!is_public).then(|| permission_key_for(&name));

    RouteDescriptor {
        path: (rule.path)(&input),
        module: relative.to_string(),
        name,
        is_public,
        permission_key,
    }
}

/// 提取页面根下的相对模块路径；不符合 `pages/<seg>(/<seg>)*` 的键返回 `None`
pub fn relative_module(key: &str) -> Option<&str> {
    let relative = key.strip_prefix(PAGES_ROOT)?;
    let valid = !relative.is_empty()
        && relative.split('/').all(|seg| {
            !seg.is_empty() && seg.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        });
    valid.then_some(relative)
}

// =========================================================
// 路由表
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("路由路径重复: {path} ({first} 与 {second})")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

/// 路由表条目：描述符 + 页面加载器
#[derive(Debug, Clone)]
pub struct RouteEntry<L> {
    pub descriptor: RouteDescriptor,
    pub loader: L,
}

/// 只读路由表
#[derive(Debug, Clone)]
pub struct RouteTable<L> {
    entries: Vec<RouteEntry<L>>,
}

impl<L> RouteTable<L> {
    /// 扫描页面清单生成路由表
    ///
    /// 不符合页面根格式的键被跳过；路径（忽略大小写）重复时报错。
    pub fn build<'a, I>(modules: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (&'a str, L)>,
    {
        let mut entries: Vec<RouteEntry<L>> = Vec::new();
        for (key, loader) in modules {
            let Some(relative) = relative_module(key) else {
                tracing::debug!("[Routes] Skipping module outside pages root: {}", key);
                continue;
            };
            let descriptor = derive_route(relative);
            let normalized = normalize_path(&descriptor.path);

            if let Some(existing) = entries
                .iter()
                .find(|e| normalize_path(&e.descriptor.path) == normalized)
            {
                return Err(RouteTableError::DuplicatePath {
                    path: descriptor.path,
                    first: existing.descriptor.module.clone(),
                    second: descriptor.module,
                });
            }

            tracing::debug!("[Routes] Registered {}", descriptor);
            entries.push(RouteEntry { descriptor, loader });
        }
        Ok(Self { entries })
    }

    /// 按路径查找（忽略大小写、查询串和末尾斜杠）
    pub fn find(&self, path: &str) -> Option<&RouteEntry<L>> {
        let wanted = normalize_path(path);
        self.entries
            .iter()
            .find(|e| normalize_path(&e.descriptor.path) == wanted)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 路径规范化：去掉查询串 / 片段和末尾斜杠，转为小写；空路径视为根
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_lowercase()
    } else {
        format!("/{}", trimmed.to_lowercase())
    }
}

/// 路径是否属于移动端命名空间
pub fn is_mobile_path(path: &str) -> bool {
    normalize_path(path).starts_with(MOBILE_PREFIX)
}

// =========================================================
// 页面懒加载
// =========================================================

/// 页面模块加载失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PageLoadError(pub String);

/// 页面加载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlot<C> {
    Ready(C),
    /// 加载失败，仅在该路由位置渲染内联提示
    Failed(String),
}

/// 等待页面加载器完成；失败时记录日志并降级为 `PageSlot::Failed`
pub async fn load_page<C, F>(descriptor: &RouteDescriptor, loader: F) -> PageSlot<C>
where
    F: Future<Output = Result<C, PageLoadError>>,
{
    match loader.await {
        Ok(component) => PageSlot::Ready(component),
        Err(e) => {
            tracing::error!("[Routes] Failed to load page {}: {}", descriptor, e);
            PageSlot::Failed(format!("{} 加载失败: {}", descriptor.path, e))
        }
    }
}
