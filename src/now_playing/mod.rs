mod store;

pub use store::{NOW_PLAYING_FILE, NowPlayingReader, NowPlayingStore, load_record, save_record};

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER: &str = "N/A";

/// 最近一次观察到的正在播放条目；无数据时两个字段都是 "N/A"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingRecord {
    pub song_name: String,
    pub artist_name: String,
}

impl NowPlayingRecord {
    pub fn new(song_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            song_name: song_name.into(),
            artist_name: artist_name.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER, PLACEHOLDER)
    }

    pub fn is_placeholder(&self) -> bool {
        self.song_name == PLACEHOLDER && self.artist_name == PLACEHOLDER
    }
}

impl Default for NowPlayingRecord {
    fn default() -> Self {
        Self::placeholder()
    }
}
