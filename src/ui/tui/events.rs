use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::kiosk::{EventSource, InputEvent, Key, PointerButton};

/// 从 crossterm 非阻塞地读取事件
#[derive(Debug, Default)]
pub struct CrosstermEvents {
    last_pointer: Option<(u16, u16)>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        Self::default()
    }

    fn translate(&mut self, ev: Event) -> Option<InputEvent> {
        match ev {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<InputEvent> {
        let pos = (mouse.column, mouse.row);
        let prev = self.last_pointer.replace(pos);
        match mouse.kind {
            MouseEventKind::Down(button) => Some(InputEvent::PointerDown {
                button: match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                },
                x: mouse.column,
                y: mouse.row,
            }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // 第一次只建立基准位置
                let (px, py) = prev?;
                Some(InputEvent::PointerMotion {
                    dx: i32::from(mouse.column) - i32::from(px),
                    dy: i32::from(mouse.row) - i32::from(py),
                })
            }
            _ => None,
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(InputEvent::Quit);
    }
    let k = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(InputEvent::KeyDown(k))
}

impl EventSource for CrosstermEvents {
    fn drain(&mut self, max: usize) -> Vec<InputEvent> {
        let mut out = Vec::new();
        while out.len() < max {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(err = %e, "读取终端事件失败");
                    break;
                }
            }
            match event::read() {
                Ok(ev) => out.extend(self.translate(ev)),
                Err(e) => {
                    tracing::warn!(err = %e, "读取终端事件失败");
                    break;
                }
            }
        }
        out
    }
}
