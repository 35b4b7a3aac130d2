use crate::kiosk::MetricsSample;
use crate::now_playing::NowPlayingRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) fn cpu_usage_label(m: &MetricsSample) -> String {
    format!("CPU Usage: {:.1}%", m.cpu_usage)
}

pub(super) fn cpu_temp_label(m: &MetricsSample) -> String {
    format!("CPU Temp: {:.2}°C", m.cpu_temp_c)
}

pub(super) fn now_playing_label(r: &NowPlayingRecord) -> String {
    format!("Now Playing: {} - {}", r.song_name, r.artist_name)
}

/// 输入内容超出宽度时只保留尾部，返回可见文本和光标列偏移
pub(super) fn input_tail(text: &str, width: u16) -> (&str, u16) {
    let width = usize::from(width.saturating_sub(1));
    let mut start = 0;
    let mut shown = text.width();
    for (i, c) in text.char_indices() {
        if shown <= width {
            break;
        }
        shown = shown.saturating_sub(c.width().unwrap_or(0));
        start = i + c.len_utf8();
    }
    let tail = &text[start..];
    (tail, u16::try_from(tail.width()).unwrap_or(u16::MAX))
}
