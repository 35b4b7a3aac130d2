use super::KioskEffect;
use super::cursor::CursorState;
use super::layout::{KioskLayout, Region};
use crate::alarm::{AlarmBell, AlarmRegistry};
use crate::playback::TransportCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// 与具体终端/窗口系统无关的输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    PointerDown {
        button: PointerButton,
        x: u16,
        y: u16,
    },
    PointerMotion {
        dx: i32,
        dy: i32,
    },
}

/// 每个 tick 拉取一批有界、有序的输入事件
pub trait EventSource {
    fn drain(&mut self, max: usize) -> Vec<InputEvent>;
}

/// 输入事件可以修改的状态
pub struct InputTargets<'a> {
    pub registry: &'a mut AlarmRegistry,
    pub bell: &'a mut AlarmBell,
    pub effects: &'a mut Vec<KioskEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// 把原始输入翻译成闹钟增删、停止响铃、播放命令和光标状态
#[derive(Debug, Clone)]
pub struct InputController {
    buffer: String,
    click_interval_ms: u64,
    last_click_ms: Option<u64>,
    cursor: CursorState,
}

impl InputController {
    pub fn new(now_ms: u64, click_interval_ms: u64, cursor_idle_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            click_interval_ms,
            last_click_ms: None,
            cursor: CursorState::new(now_ms, cursor_idle_ms),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    pub fn handle(
        &mut self,
        event: InputEvent,
        now_ms: u64,
        layout: &KioskLayout,
        targets: &mut InputTargets<'_>,
    ) -> Control {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return Control::Quit,
            InputEvent::KeyDown(key) => self.handle_key(key, targets),
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                x,
                y,
            } => self.handle_click(x, y, now_ms, layout, targets),
            InputEvent::PointerDown { .. } => {}
            InputEvent::PointerMotion { dx, dy } => {
                if dx != 0 || dy != 0 {
                    self.cursor.on_motion(now_ms);
                }
            }
        }
        Control::Continue
    }

    fn handle_key(&mut self, key: Key, targets: &mut InputTargets<'_>) {
        match key {
            Key::Enter => {
                // 无论解析是否成功都清空输入
                targets.registry.add(&self.buffer);
                self.buffer.clear();
            }
            Key::Backspace => {
                self.buffer.pop();
            }
            Key::Char(c) if !c.is_control() => self.buffer.push(c),
            Key::Char(_) | Key::Escape | Key::Other => {}
        }
    }

    fn handle_click(
        &mut self,
        x: u16,
        y: u16,
        now_ms: u64,
        layout: &KioskLayout,
        targets: &mut InputTargets<'_>,
    ) {
        match layout.hit(x, y) {
            Some(Region::AlarmRow(row)) => {
                let double = self
                    .last_click_ms
                    .is_some_and(|last| now_ms.saturating_sub(last) < self.click_interval_ms);
                if double {
                    targets.registry.remove_at(row);
                }
                self.last_click_ms = Some(now_ms);
            }
            Some(Region::Stop) => {
                targets.bell.stop();
                targets.effects.push(KioskEffect::StopAlarm);
            }
            Some(Region::Prev) => targets
                .effects
                .push(KioskEffect::Playback(TransportCommand::Previous)),
            Some(Region::PlayPause) => targets
                .effects
                .push(KioskEffect::Playback(TransportCommand::TogglePlayPause)),
            Some(Region::Next) => targets
                .effects
                .push(KioskEffect::Playback(TransportCommand::Next)),
            Some(Region::Input) | None => {}
        }
    }
}
