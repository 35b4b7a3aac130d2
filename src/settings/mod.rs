pub mod credentials;
pub mod store;

pub use credentials::{Credentials, load_credentials};
pub use store::{KioskSettings, load_settings};

use directories::ProjectDirs;
use std::path::PathBuf;

/// 系统 data_local_dir 下的数据目录，拿不到时退回临时目录
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "wallclock", "wallclock-ratui")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("wallclock-ratui"))
}
