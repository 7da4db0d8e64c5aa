use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// sessionStorage 中保存会话的键
pub const SESSION_STORAGE_KEY: &str = "user-storage";
/// 所有看板类页面（列表/详情/撰写）共享的权限键
pub const BOARD_PERMISSION_KEY: &str = "mainBoard";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已认证用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// 服务端签发的会话令牌
    pub token: String,
    /// 授权集合：用户可访问的页面标识
    #[serde(default)]
    pub auth: Vec<String>,
    /// 会话过期时间，缺省表示由服务端 Cookie 控制
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl User {
    /// 本地会话有效性检查（不发起网络请求）
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        if self.token.trim().is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

/// 菜单 / 权限树节点
///
/// `url` 为空的节点只是分组节点，不可直接访问。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn is_group(&self) -> bool {
        self.url.is_none()
    }
}

/// 静态菜单文档：桌面端树形菜单 + 移动端快捷入口
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFixture {
    #[serde(default)]
    pub desktop: Vec<MenuNode>,
    #[serde(default)]
    pub mobile: Vec<MenuNode>,
}

/// 公告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub created_at: chrono::NaiveDate,
    #[serde(default)]
    pub body: String,
}

/// 后端统一响应包装 `{ success, data, message }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 将包装拆解为业务结果，`success: false` 时返回服务端消息
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "request rejected".to_string()))
        }
    }
}
