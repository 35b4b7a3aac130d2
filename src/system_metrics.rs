use std::time::Instant;
use sysinfo::{Components, MINIMUM_CPU_UPDATE_INTERVAL, System};

use crate::kiosk::{MetricsSample, MetricsSource};

/// 基于 sysinfo 的 CPU 占用率和温度读取
pub struct SysinfoMetrics {
    system: System,
    components: Components,
    cpu_refreshed_at: Instant,
    cpu_usage: f32,
}

impl SysinfoMetrics {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        let components = Components::new_with_refreshed_list();
        tracing::debug!(count = components.list().len(), "温度传感器列表");
        Self {
            system,
            components,
            cpu_refreshed_at: Instant::now(),
            cpu_usage: 0.0,
        }
    }

    /// 两次刷新间隔小于 MINIMUM_CPU_UPDATE_INTERVAL 时差值不可靠，沿用上一次读数（首次为 0）
    fn cpu_usage(&mut self) -> f32 {
        if self.cpu_refreshed_at.elapsed() >= MINIMUM_CPU_UPDATE_INTERVAL {
            self.system.refresh_cpu_usage();
            self.cpu_refreshed_at = Instant::now();
            self.cpu_usage = self.system.global_cpu_usage();
        }
        self.cpu_usage
    }

    fn cpu_temperature(&self) -> Option<f32> {
        let list = self.components.list();
        list.iter()
            .find(|c| is_cpu_label(c.label()))
            .or_else(|| list.first())
            .and_then(|c| c.temperature())
            .filter(|t| t.is_finite())
    }
}

impl Default for SysinfoMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoMetrics {
    fn sample(&mut self) -> MetricsSample {
        self.components.refresh(false);
        MetricsSample {
            cpu_usage: self.cpu_usage(),
            cpu_temp_c: self.cpu_temperature().unwrap_or(0.0),
        }
    }
}

fn is_cpu_label(label: &str) -> bool {
    let l = label.to_ascii_lowercase();
    ["cpu", "thermal", "package", "tctl", "coretemp"]
        .iter()
        .any(|k| l.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_label_detection() {
        assert!(is_cpu_label("cpu_thermal temp1"));
        assert!(is_cpu_label("k10temp Tctl"));
        assert!(is_cpu_label("Package id 0"));
        assert!(!is_cpu_label("nvme Composite"));
    }

    #[test]
    fn test_sample_is_in_range() {
        let mut m = SysinfoMetrics::new();
        let s = m.sample();
        assert!((0.0..=100.0).contains(&s.cpu_usage));
        assert!(s.cpu_temp_c.is_finite());
    }

    #[test]
    fn test_early_sample_keeps_baseline() {
        let mut m = SysinfoMetrics::new();
        let baseline = m.cpu_refreshed_at;
        assert_eq!(m.sample().cpu_usage, 0.0);
        assert_eq!(m.cpu_refreshed_at, baseline);

        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        let s = m.sample();
        assert!(m.cpu_refreshed_at > baseline);
        assert!((0.0..=100.0).contains(&s.cpu_usage));
    }
}
