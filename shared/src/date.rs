//! 会话过期时间

use serde::{Deserialize, Serialize};

/// 自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }
}
