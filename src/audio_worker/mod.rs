//! 闹钟铃声工作线程：rodio 的输出流不是 `Send`，整个播放器只活在这一个线程里。

mod messages;
mod player;
mod worker;

pub use messages::AlarmAudioCommand;
pub use player::alarm_source;
pub use worker::{AlarmAudio, AudioBackend, spawn_audio_worker};
