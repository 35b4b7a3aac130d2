//! 渲染循环每个 tick 的纯状态推进：光标空闲 -> 输入事件 -> 响铃状态机 -> 指标缓存。
//!
//! 这里不接触终端、网络和声卡；副作用以 [`KioskEffect`] 的形式交给调用方转发。

pub mod cursor;
pub mod input;
pub mod layout;
pub mod metrics;

use chrono::NaiveDateTime;

use crate::alarm::{AlarmBell, AlarmRegistry, AlarmTime, SoundState};
use crate::playback::TransportCommand;
use crate::settings::KioskSettings;

pub use input::{
    Control, EventSource, InputController, InputEvent, InputTargets, Key, PointerButton,
};
pub use layout::{KioskLayout, Region};
pub use metrics::{MetricsCache, MetricsSample, MetricsSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskEffect {
    StartAlarm,
    StopAlarm,
    Playback(TransportCommand),
}

/// 一个 tick 的时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    pub wall: NaiveDateTime,
    pub ticks_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub quit: bool,
    pub effects: Vec<KioskEffect>,
}

/// 绘制一帧所需的只读快照
#[derive(Debug, Clone, Copy)]
pub struct KioskView<'a> {
    pub wall: NaiveDateTime,
    pub alarms: &'a AlarmRegistry,
    pub input: &'a str,
    pub sound: SoundState,
    pub cursor_visible: bool,
    pub metrics: MetricsSample,
}

impl KioskView<'_> {
    pub fn alarm_labels(&self) -> impl Iterator<Item = &AlarmTime> {
        self.alarms.iter()
    }
}

pub struct Kiosk {
    registry: AlarmRegistry,
    bell: AlarmBell,
    controller: InputController,
    metrics: MetricsCache,
    wall: NaiveDateTime,
}

impl Kiosk {
    pub fn new(settings: &KioskSettings, start: TickInput) -> Self {
        Self {
            registry: AlarmRegistry::new(),
            bell: AlarmBell::default(),
            controller: InputController::new(
                start.ticks_ms,
                settings.click_interval_ms,
                settings.cursor_idle_ms,
            ),
            metrics: MetricsCache::new(settings.metrics_interval_ms),
            wall: start.wall,
        }
    }

    pub fn registry(&self) -> &AlarmRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AlarmRegistry {
        &mut self.registry
    }

    pub fn bell(&self) -> &AlarmBell {
        &self.bell
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    pub fn tick(
        &mut self,
        now: TickInput,
        events: impl IntoIterator<Item = InputEvent>,
        layout: &KioskLayout,
        metrics: &mut dyn MetricsSource,
    ) -> TickOutcome {
        self.wall = now.wall;
        let mut outcome = TickOutcome::default();

        self.controller.cursor_mut().check_idle(now.ticks_ms);

        let mut targets = InputTargets {
            registry: &mut self.registry,
            bell: &mut self.bell,
            effects: &mut outcome.effects,
        };
        // 退出只在本 tick 结束后生效，同批后续事件和响铃求值照常进行
        for event in events {
            if self.controller.handle(event, now.ticks_ms, layout, &mut targets) == Control::Quit
                && !outcome.quit
            {
                tracing::info!("收到退出事件");
                outcome.quit = true;
            }
        }

        if self.bell.evaluate(&self.registry, &now.wall) {
            outcome.effects.push(KioskEffect::StartAlarm);
        }

        self.metrics.refresh_if_due(now.ticks_ms, metrics);
        outcome
    }

    pub fn view(&self) -> KioskView<'_> {
        KioskView {
            wall: self.wall,
            alarms: &self.registry,
            input: self.controller.buffer(),
            sound: self.bell.state(),
            cursor_visible: self.controller.cursor().visible(),
            metrics: self.metrics.value(),
        }
    }
}
