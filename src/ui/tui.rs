// TUI 子模块
mod clock_face;
mod event_loop;
mod events;
mod guard;
mod panels;
mod styles;
mod utils;
mod views;

pub use event_loop::{EffectSink, Frontend, run_tui};
pub use events::CrosstermEvents;
pub use views::draw_ui;
