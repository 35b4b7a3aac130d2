//! 统一错误处理模块
//!
//! 各模块的结构化错误类型，稳态循环里只记录日志并回退到默认值，只有启动阶段的错误会向上传播。

mod app;
mod audio;
mod config;
mod spotify;
mod store;

pub use app::AppError;
pub use audio::AudioError;
pub use config::ConfigError;
pub use spotify::SpotifyError;
pub use store::StoreError;
