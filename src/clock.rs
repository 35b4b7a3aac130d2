use chrono::{Local, NaiveDateTime};
use std::time::Instant;

/// 墙上时间 + 单调毫秒计数
pub trait Clock {
    fn wall(&self) -> NaiveDateTime;
    fn ticks_ms(&self) -> u64;
}

pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wall(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn ticks_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_monotonic() {
        let clock = SystemClock::new();
        let a = clock.ticks_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.ticks_ms() >= a + 5);
    }
}
