//! 闹钟音频相关错误

use std::path::PathBuf;

/// 闹钟音频错误类型
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// 打开音频文件失败
    #[error("打开音频文件失败({}): {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 解码音频失败
    #[error("解码音频失败({}): {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// 音频输出流创建失败
    #[error("创建音频输出流失败: {0}")]
    OutputStream(String),
}
