use super::clock_face::draw_clock_face;
use super::panels::{draw_alarms, draw_button, draw_input, draw_metrics, draw_now_playing};
use crate::alarm::SoundState;
use crate::kiosk::{KioskLayout, KioskView};
use crate::now_playing::NowPlayingRecord;
use ratatui::Frame;

/// 只读取状态，不修改任何组件
pub fn draw_ui(
    f: &mut Frame,
    layout: &KioskLayout,
    view: &KioskView<'_>,
    now_playing: &NowPlayingRecord,
) {
    draw_clock_face(f, layout.clock, view.wall.time());
    draw_input(f, layout, view);
    draw_alarms(f, layout.alarms, view);
    draw_button(f, layout.stop, "Stop Alarm", view.sound == SoundState::Ringing);
    draw_metrics(f, layout.metrics, view);
    draw_button(f, layout.prev, "Prev", false);
    draw_button(f, layout.play_pause, "Play/Pause", false);
    draw_button(f, layout.next, "Next", false);
    draw_now_playing(f, layout.now_playing, now_playing);
}
