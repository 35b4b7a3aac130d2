//! 正在播放记录持久化相关错误

/// 正在播放记录存储错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::from(io_err);
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = StoreError::from(serde_err);
        assert!(matches!(err, StoreError::Serde(_)));
    }
}
