//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 无数据返回的操作确认，例如删除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
