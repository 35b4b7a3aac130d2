use super::NowPlayingRecord;
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

pub const NOW_PLAYING_FILE: &str = "now_playing.json";

/// 读取持久化的记录；文件不存在或内容损坏时返回占位记录
pub fn load_record(path: &Path) -> NowPlayingRecord {
    let Ok(bytes) = fs::read(path) else {
        return NowPlayingRecord::placeholder();
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(path = %path.display(), err = %e, "now_playing 文件损坏，使用默认值");
            NowPlayingRecord::placeholder()
        }
    }
}

/// 先写临时文件再 rename，读者只会看到旧的完整记录或新的完整记录
pub fn save_record(path: &Path, record: &NowPlayingRecord) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(record)?;
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Io(e));
    }
    Ok(())
}

/// 单槽、last-write-wins 的正在播放存储
///
/// 写者是 StateSync，读者是渲染循环。内存里用 watch 通道保存最新值，磁盘上保存同一条记录，
/// 重启后从文件恢复。
#[derive(Debug)]
pub struct NowPlayingStore {
    path: PathBuf,
    tx: watch::Sender<NowPlayingRecord>,
}

impl NowPlayingStore {
    pub fn open(data_dir: &Path) -> Self {
        Self::open_at(data_dir.join(NOW_PLAYING_FILE))
    }

    pub fn open_at(path: PathBuf) -> Self {
        let initial = load_record(&path);
        tracing::debug!(
            path = %path.display(),
            song = %initial.song_name,
            artist = %initial.artist_name,
            "now_playing 已加载"
        );
        let (tx, _rx) = watch::channel(initial);
        Self { path, tx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reader(&self) -> NowPlayingReader {
        NowPlayingReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> NowPlayingRecord {
        self.tx.borrow().clone()
    }

    /// 持久化成功后才发布给读者；失败时读者继续看到上一条记录
    pub fn write(&self, record: NowPlayingRecord) -> Result<(), StoreError> {
        save_record(&self.path, &record)?;
        self.tx.send_replace(record);
        Ok(())
    }
}

/// 渲染循环持有的只读句柄
#[derive(Debug, Clone)]
pub struct NowPlayingReader {
    rx: watch::Receiver<NowPlayingRecord>,
}

impl NowPlayingReader {
    pub fn current(&self) -> NowPlayingRecord {
        self.rx.borrow().clone()
    }

    /// 不依赖写者的读者，测试和离线模式使用
    pub fn fixed(record: NowPlayingRecord) -> Self {
        let (_tx, rx) = watch::channel(record);
        Self { rx }
    }
}
