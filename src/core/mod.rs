//! 核心层：错误处理、中间件、通用响应

pub mod error;
pub mod middleware;
pub mod response;

pub use error::{CoreError, ErrorResponse};
pub use response::SuccessResponse;
