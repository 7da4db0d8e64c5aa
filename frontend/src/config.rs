//! 运行时配置
//!
//! 配置在编译期从环境变量读取（构建工具注入），缺省值适用于本地开发：
//! - `OFFICEHUB_API_BASE`: 后端 API 根地址
//! - `OFFICEHUB_BASE_PATH`: 应用部署的基础路径
//! - `OFFICEHUB_LOG`: 日志级别

use tracing::Level;

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_BASE_PATH: &str = "/";
const DEFAULT_LOG_LEVEL: &str = "info";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端 API 根地址（不含末尾斜杠）
    pub api_base_url: String,
    /// 基础路径，规范化为以 `/` 开头、不以 `/` 结尾（根路径为空串）
    pub base_path: String,
    pub log_level: Level,
}

impl AppConfig {
    pub fn new(api_base_url: &str, base_path: &str, log_level: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            base_path: normalize_base(base_path),
            log_level: log_level.parse().unwrap_or(Level::INFO),
        }
    }

    /// 从编译期环境变量构建配置
    pub fn from_env() -> Self {
        Self::new(
            option_env!("OFFICEHUB_API_BASE").unwrap_or(DEFAULT_API_BASE),
            option_env!("OFFICEHUB_BASE_PATH").unwrap_or(DEFAULT_BASE_PATH),
            option_env!("OFFICEHUB_LOG").unwrap_or(DEFAULT_LOG_LEVEL),
        )
    }

    /// 去掉浏览器路径中的基础路径，得到应用内路径
    pub fn strip_base(&self, pathname: &str) -> String {
        let rest = if self.base_path.is_empty() {
            pathname
        } else {
            match strip_prefix_ignore_case(pathname, &self.base_path) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => pathname,
            }
        };
        if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        }
    }

    /// 为应用内路径加上基础路径，用于写入 History
    pub fn with_base(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_path, path)
        } else {
            format!("{}/{}", self.base_path, path)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_BASE_PATH, DEFAULT_LOG_LEVEL)
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
