//! 目录服务客户端错误

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// 网络层失败（连接、超时等）
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非 2xx 状态码
    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// 响应体无法解析
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid client configuration: {0}")]
    Config(String),
}
