pub mod cli;
pub mod tui;

pub use cli::{Cli, Command};
pub use tui::{CrosstermEvents, EffectSink, Frontend, run_tui};
