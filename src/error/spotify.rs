//! Spotify Web API 相关错误

/// Spotify 接口错误类型
#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// 网络请求错误
    #[error("reqwest 错误: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// IO 错误（token 缓存）
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("serde 错误: {0}")]
    Serde(#[from] serde_json::Error),

    /// 非 2xx 响应
    #[error("API 返回错误: status={status}, body={body}")]
    Status { status: u16, body: String },

    /// 没有可用的 token，需要先执行 authorize
    #[error("未授权: 请先运行 `wallclock-ratui authorize`")]
    NotAuthorized,

    /// 授权流程失败
    #[error("授权失败: {0}")]
    Auth(String),
}

impl SpotifyError {
    /// 判断是否是认证错误
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            SpotifyError::NotAuthorized
                | SpotifyError::Auth(_)
                | SpotifyError::Status { status: 401, .. }
        )
    }
}
