use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 运行参数（`{data_dir}/settings.json`，缺失或损坏时使用默认值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KioskSettings {
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_click_interval_ms")]
    pub click_interval_ms: u64,
    #[serde(default = "default_cursor_idle_ms")]
    pub cursor_idle_ms: u64,
    #[serde(default = "default_metrics_interval_ms")]
    pub metrics_interval_ms: u64,

    // 启动时的设备激活
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default = "default_activation_retries")]
    pub activation_retries: u32,
    #[serde(default = "default_activation_retry_delay_secs")]
    pub activation_retry_delay_secs: u64,

    /// 闹钟铃声文件；None 时使用内置提示音
    #[serde(default)]
    pub alarm_sound: Option<PathBuf>,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            frame_rate_hz: default_frame_rate_hz(),
            poll_interval_secs: default_poll_interval_secs(),
            click_interval_ms: default_click_interval_ms(),
            cursor_idle_ms: default_cursor_idle_ms(),
            metrics_interval_ms: default_metrics_interval_ms(),
            device_name: default_device_name(),
            activation_retries: default_activation_retries(),
            activation_retry_delay_secs: default_activation_retry_delay_secs(),
            alarm_sound: None,
        }
    }
}

impl KioskSettings {
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate_hz.clamp(1, 240)))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn activation_retry_delay(&self) -> Duration {
        Duration::from_secs(self.activation_retry_delay_secs)
    }
}

// 默认值函数（用于 serde default）
fn default_frame_rate_hz() -> u32 { 30 }
fn default_poll_interval_secs() -> u64 { 10 }
fn default_click_interval_ms() -> u64 { 500 }
fn default_cursor_idle_ms() -> u64 { 5000 }
fn default_metrics_interval_ms() -> u64 { 1000 }
fn default_device_name() -> String { "Pi 5".to_owned() }
fn default_activation_retries() -> u32 { 5 }
fn default_activation_retry_delay_secs() -> u64 { 5 }

pub fn load_settings(data_dir: &Path) -> KioskSettings {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return KioskSettings::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::warn!(path = %p.display(), err = %e, "settings.json 解析失败，使用默认值");
        KioskSettings::default()
    })
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_kiosk_timings() {
        let s = KioskSettings::default();
        assert_eq!(s.frame_rate_hz, 30);
        assert_eq!(s.poll_interval(), Duration::from_secs(10));
        assert_eq!(s.click_interval_ms, 500);
        assert_eq!(s.cursor_idle_ms, 5000);
        assert_eq!(s.metrics_interval_ms, 1000);
        assert_eq!(s.device_name, "Pi 5");
        assert_eq!(s.activation_retries, 5);
        assert_eq!(s.frame_period(), Duration::from_millis(33));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let s: KioskSettings =
            serde_json::from_str(r#"{"device_name": "Kitchen", "frame_rate_hz": 10}"#)
                .expect("parse");
        assert_eq!(s.device_name, "Kitchen");
        assert_eq!(s.frame_period(), Duration::from_millis(100));
        assert_eq!(s.cursor_idle_ms, 5000);
        assert_eq!(s.alarm_sound, None);
    }

    #[test]
    fn test_zero_frame_rate_is_clamped() {
        let s = KioskSettings {
            frame_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(s.frame_period(), Duration::from_millis(1000));
    }
}
