//! 后台轮询：定期查询当前播放，变化时写入 NowPlayingStore

use crate::now_playing::{NowPlayingRecord, NowPlayingStore, PLACEHOLDER};
use crate::playback::{CurrentlyPlaying, PlaybackProvider, PlayingType};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Written,
    Unchanged,
    WriteFailed,
}

/// 把一次查询结果折叠成记录：没有播放、查询失败、非歌曲条目都是 N/A
pub fn derive_record<E: std::fmt::Display>(
    result: Result<Option<CurrentlyPlaying>, E>,
) -> NowPlayingRecord {
    let playing = match result {
        Ok(Some(p)) => p,
        Ok(None) => return NowPlayingRecord::placeholder(),
        Err(e) => {
            tracing::warn!(err = %e, "查询当前播放失败，本轮按无数据处理");
            return NowPlayingRecord::placeholder();
        }
    };
    if playing.kind != PlayingType::Track {
        return NowPlayingRecord::placeholder();
    }
    let Some(song) = playing.item_name else {
        return NowPlayingRecord::placeholder();
    };
    NowPlayingRecord::new(
        song,
        playing.primary_artist.unwrap_or_else(|| PLACEHOLDER.to_owned()),
    )
}

pub struct StateSync<P> {
    provider: Arc<P>,
    store: Arc<NowPlayingStore>,
    last_written: Option<NowPlayingRecord>,
}

impl<P: PlaybackProvider> StateSync<P> {
    pub fn new(provider: Arc<P>, store: Arc<NowPlayingStore>) -> Self {
        Self {
            provider,
            store,
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&NowPlayingRecord> {
        self.last_written.as_ref()
    }

    /// 一轮轮询；失败不重试，下一轮就是重试
    pub async fn poll_once(&mut self) -> SyncOutcome {
        tracing::debug!("StateSync 轮询中");
        let record = derive_record(self.provider.currently_playing().await);

        if self.last_written.as_ref() == Some(&record) {
            tracing::debug!("记录未变化，跳过写入");
            return SyncOutcome::Unchanged;
        }

        match self.store.write(record.clone()) {
            Ok(()) => {
                tracing::info!(
                    song = %record.song_name,
                    artist = %record.artist_name,
                    "now_playing 已更新"
                );
                self.last_written = Some(record);
                SyncOutcome::Written
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    err = %e,
                    "写入 now_playing 失败"
                );
                SyncOutcome::WriteFailed
            }
        }
    }
}

/// 后台任务句柄；可选地发出停止信号，进程退出时不需要 join。句柄被丢弃等同于停止。
pub struct StateSyncHandle {
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl StateSyncHandle {
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// 立即轮询一次，之后每隔 `interval` 轮询
pub fn spawn_state_sync<P: PlaybackProvider>(
    provider: Arc<P>,
    store: Arc<NowPlayingStore>,
    interval: Duration,
) -> StateSyncHandle {
    let (tx, mut rx) = oneshot::channel::<()>();
    let mut sync = StateSync::new(provider, store);

    let join = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval_ms = interval.as_millis() as u64, "StateSync 已启动");
        loop {
            tokio::select! {
                _ = &mut rx => break,
                _ = ticker.tick() => {
                    sync.poll_once().await;
                }
            }
        }
        tracing::info!("StateSync 已停止");
    });

    StateSyncHandle {
        shutdown: Some(tx),
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, artist: Option<&str>) -> CurrentlyPlaying {
        CurrentlyPlaying {
            kind: PlayingType::Track,
            item_name: Some(name.to_owned()),
            primary_artist: artist.map(str::to_owned),
        }
    }

    #[test]
    fn test_derive_track() {
        let r = derive_record::<String>(Ok(Some(track("Song", Some("Artist")))));
        assert_eq!(r, NowPlayingRecord::new("Song", "Artist"));
    }

    #[test]
    fn test_derive_track_without_artist() {
        let r = derive_record::<String>(Ok(Some(track("Song", None))));
        assert_eq!(r, NowPlayingRecord::new("Song", "N/A"));
    }

    #[test]
    fn test_derive_placeholders() {
        assert!(derive_record::<String>(Ok(None)).is_placeholder());
        assert!(derive_record(Err("boom")).is_placeholder());

        let episode = CurrentlyPlaying {
            kind: PlayingType::Episode,
            item_name: Some("Podcast #12".to_owned()),
            primary_artist: Some("Host".to_owned()),
        };
        assert!(derive_record::<String>(Ok(Some(episode))).is_placeholder());

        let no_item = CurrentlyPlaying {
            kind: PlayingType::Track,
            item_name: None,
            primary_artist: None,
        };
        assert!(derive_record::<String>(Ok(Some(no_item))).is_placeholder());
    }
}
