//! 外部播放服务：接口、领域类型、命令 actor 与启动时的设备激活

mod actor;
pub mod spotify;

pub use actor::{TransportCommand, activate_device, spawn_playback_actor};

use crate::error::SpotifyError;
use std::future::Future;

/// 当前播放条目的类型；只有 Track 会暴露歌曲信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayingType {
    Track,
    Episode,
    Ad,
    Unknown,
}

impl PlayingType {
    pub fn from_api(s: &str) -> Self {
        match s {
            "track" => PlayingType::Track,
            "episode" => PlayingType::Episode,
            "ad" => PlayingType::Ad,
            _ => PlayingType::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentlyPlaying {
    pub kind: PlayingType,
    /// 条目名称（歌曲名/单集名）；没有 item 时为 None
    pub item_name: Option<String>,
    pub primary_artist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_playing: bool,
}

/// 播放服务能力。所有调用都可能失败，核心逻辑把失败当作“无数据”或“无操作”处理。
pub trait PlaybackProvider: Send + Sync + 'static {
    fn devices(&self) -> impl Future<Output = Result<Vec<Device>, SpotifyError>> + Send;

    /// 把播放转移到设备上，`play = false` 时不自动开始播放
    fn transfer_playback(
        &self,
        device_id: &str,
        play: bool,
    ) -> impl Future<Output = Result<(), SpotifyError>> + Send;

    /// 没有任何播放时返回 `Ok(None)`
    fn currently_playing(
        &self,
    ) -> impl Future<Output = Result<Option<CurrentlyPlaying>, SpotifyError>> + Send;

    /// 没有活跃会话时返回 `Ok(None)`
    fn playback_status(
        &self,
    ) -> impl Future<Output = Result<Option<PlaybackStatus>, SpotifyError>> + Send;

    fn pause(&self) -> impl Future<Output = Result<(), SpotifyError>> + Send;

    fn resume(&self) -> impl Future<Output = Result<(), SpotifyError>> + Send;

    fn previous(&self) -> impl Future<Output = Result<(), SpotifyError>> + Send;

    fn next(&self) -> impl Future<Output = Result<(), SpotifyError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playing_type_from_api() {
        assert_eq!(PlayingType::from_api("track"), PlayingType::Track);
        assert_eq!(PlayingType::from_api("episode"), PlayingType::Episode);
        assert_eq!(PlayingType::from_api("ad"), PlayingType::Ad);
        assert_eq!(PlayingType::from_api("unknown"), PlayingType::Unknown);
        assert_eq!(PlayingType::from_api(""), PlayingType::Unknown);
    }
}
