//! 前端错误类型

use thiserror::Error;

/// 与后端及浏览器存储交互时的错误
#[derive(Debug, Error)]
pub enum PortalError {
    /// 网络请求失败（无法连接、CORS 等）
    #[error("网络错误: {0}")]
    Network(String),
    /// 非 2xx 响应
    #[error("请求失败，状态码 {0}")]
    Status(u16),
    /// 后端返回 `success: false`
    #[error("请求被拒绝: {0}")]
    Rejected(String),
    /// 响应体解析失败
    #[error("响应解析失败: {0}")]
    Decode(String),
    /// 成功响应中缺少 data
    #[error("响应缺少数据")]
    EmptyPayload,
    /// 会话存储读写失败
    #[error("存储错误: {0}")]
    Storage(String),
}

pub type PortalResult<T> = Result<T, PortalError>;
