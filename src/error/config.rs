//! 凭据文件相关错误

use std::path::PathBuf;

/// 凭据/配置加载错误，属于启动期致命错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 读取文件失败
    #[error("读取配置文件失败({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("解析配置文件失败({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 必填字段为空
    #[error("配置缺少字段: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("spotify_config.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("spotify_config.json"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = ConfigError::Parse {
            path: PathBuf::from("x.json"),
            source: serde_err,
        };
        use std::error::Error;
        assert!(err.source().is_some());
    }
}
