//! SessionStorage 封装模块
//!
//! 基于 `gloo-storage`，会话数据以 JSON 形式保存在 `window.sessionStorage`，
//! 关闭浏览器标签页后自动清除。

use gloo_storage::errors::StorageError;
use gloo_storage::{SessionStorage, Storage};

use crate::error::{PortalError, PortalResult};
use crate::session::{KeyValueStore, Session};

/// 浏览器 sessionStorage 适配器
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl KeyValueStore for BrowserSessionStorage {
    fn load(&self, key: &str) -> PortalResult<Option<Session>> {
        match SessionStorage::get::<Session>(key) {
            Ok(session) => Ok(Some(session)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(PortalError::Storage(e.to_string())),
        }
    }

    fn save(&self, key: &str, session: &Session) -> PortalResult<()> {
        SessionStorage::set(key, session).map_err(|e| PortalError::Storage(e.to_string()))
    }

    fn remove(&self, key: &str) {
        SessionStorage::delete(key);
    }
}
