/// 一次系统指标采样
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSample {
    pub cpu_usage: f32,
    pub cpu_temp_c: f32,
}

pub trait MetricsSource {
    fn sample(&mut self) -> MetricsSample;
}

/// 缓存采样值，距离上次刷新不足 `interval_ms` 时不读传感器
#[derive(Debug, Clone)]
pub struct MetricsCache {
    interval_ms: u64,
    last_refresh_ms: Option<u64>,
    value: MetricsSample,
}

impl MetricsCache {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_refresh_ms: None,
            value: MetricsSample::default(),
        }
    }

    pub fn value(&self) -> MetricsSample {
        self.value
    }

    /// 返回是否真的刷新了
    pub fn refresh_if_due(&mut self, now_ms: u64, source: &mut dyn MetricsSource) -> bool {
        let due = match self.last_refresh_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if due {
            self.value = source.sample();
            self.last_refresh_ms = Some(now_ms);
        }
        due
    }
}
