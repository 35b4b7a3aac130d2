//! 应用通用错误

use super::{AudioError, ConfigError, SpotifyError, StoreError};

/// 应用通用错误类型（只在启动阶段和子命令里出现）
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 凭据/配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// Spotify 接口错误
    #[error("Spotify 错误: {0}")]
    Spotify(#[from] SpotifyError),

    /// 正在播放记录存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),

    /// 音频错误
    #[error("音频错误: {0}")]
    Audio(#[from] AudioError),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("IO 错误"));
    }

    #[test]
    fn test_from_config_error() {
        let err = AppError::from(ConfigError::MissingField("client_id"));
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let app_err = AppError::Io(io_err);

        use std::error::Error;
        assert!(app_err.source().is_some());
    }
}
