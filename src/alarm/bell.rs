use super::AlarmRegistry;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundState {
    #[default]
    Silent,
    Ringing,
}

/// 闹钟响铃状态机：SILENT -> RINGING 只在整分匹配时发生，RINGING -> SILENT 只由用户停止
///
/// 不记录“本分钟已响过”；第 0 秒内停止后，只要仍在第 0 秒就会再次响起。
#[derive(Debug, Clone, Default)]
pub struct AlarmBell {
    state: SoundState,
}

impl AlarmBell {
    pub fn state(&self) -> SoundState {
        self.state
    }

    pub fn is_ringing(&self) -> bool {
        self.state == SoundState::Ringing
    }

    /// 返回 true 表示本次求值从 SILENT 进入 RINGING，调用方需要开始播放铃声
    pub fn evaluate(&mut self, registry: &AlarmRegistry, now: &NaiveDateTime) -> bool {
        if self.is_ringing() || !registry.matches(now) {
            return false;
        }
        self.state = SoundState::Ringing;
        tracing::info!(at = %now.format("%H:%M:%S"), "闹钟响铃");
        true
    }

    /// 幂等；返回 true 表示确实从 RINGING 停下
    pub fn stop(&mut self) -> bool {
        let was_ringing = self.is_ringing();
        self.state = SoundState::Silent;
        if was_ringing {
            tracing::info!("闹钟已停止");
        }
        was_ringing
    }
}
