/// 光标显示状态：空闲超时后隐藏一次，任何指针移动立即恢复
#[derive(Debug, Clone)]
pub struct CursorState {
    visible: bool,
    last_activity_ms: u64,
    idle_ms: u64,
}

impl CursorState {
    pub fn new(now_ms: u64, idle_ms: u64) -> Self {
        Self {
            visible: true,
            last_activity_ms: now_ms,
            idle_ms,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    /// 返回 true 表示本次调用把光标隐藏了
    pub fn check_idle(&mut self, now_ms: u64) -> bool {
        if self.visible && now_ms.saturating_sub(self.last_activity_ms) > self.idle_ms {
            self.visible = false;
            tracing::debug!(idle_ms = self.idle_ms, "光标空闲，隐藏");
            return true;
        }
        false
    }

    pub fn on_motion(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.visible = true;
    }
}
