use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// 一个闹钟时间，保存为规范化的 `H:MM` / `HH:MM` 文本
///
/// 小时保留用户输入的位数（`7:30` 不会补零成 `07:30`），分钟固定两位。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmTime {
    label: String,
}

impl AlarmTime {
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// 解析 `hour[:.]minute`：小时 0-23（一位或两位），分钟 00-59（两位）
///
/// 等价于 `^([01]?\d|2[0-3])[:.]([0-5]\d)$`，整段文本必须匹配。
pub fn parse_alarm_time(raw: &str) -> Option<AlarmTime> {
    let sep = raw.find([':', '.'])?;
    let (hour, rest) = raw.split_at(sep);
    let minute = &rest[1..];

    let hour_ok = match hour.as_bytes() {
        [h] => h.is_ascii_digit(),
        [b'0' | b'1', h] => h.is_ascii_digit(),
        [b'2', h] => (b'0'..=b'3').contains(h),
        _ => false,
    };
    let minute_ok = matches!(minute.as_bytes(), [b'0'..=b'5', m] if m.is_ascii_digit());
    if !hour_ok || !minute_ok {
        return None;
    }

    Some(AlarmTime {
        label: format!("{hour}:{minute}"),
    })
}

/// 有序闹钟列表，插入顺序即显示顺序，允许重复
#[derive(Debug, Clone, Default)]
pub struct AlarmRegistry {
    alarms: Vec<AlarmTime>,
}

impl AlarmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析并追加；解析失败时列表保持不变
    pub fn add(&mut self, raw: &str) -> bool {
        match parse_alarm_time(raw) {
            Some(alarm) => {
                tracing::info!(alarm = %alarm, "添加闹钟");
                self.alarms.push(alarm);
                true
            }
            None => {
                tracing::debug!(input = raw, "闹钟时间格式无效，忽略");
                false
            }
        }
    }

    /// 越界索引是 no-op
    pub fn remove_at(&mut self, index: usize) -> Option<AlarmTime> {
        if index >= self.alarms.len() {
            return None;
        }
        let removed = self.alarms.remove(index);
        tracing::info!(alarm = %removed, index, "删除闹钟");
        Some(removed)
    }

    /// 只在整分（second == 0）时求值
    pub fn matches(&self, now: &NaiveDateTime) -> bool {
        if now.second() != 0 {
            return false;
        }
        let hhmm = now.format("%H:%M").to_string();
        self.alarms.iter().any(|a| a.as_str() == hhmm)
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlarmTime> {
        self.alarms.iter()
    }
}
