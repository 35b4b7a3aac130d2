pub mod alarm;
pub mod audio_worker;
pub mod clock;
pub mod error;
pub mod kiosk;
pub mod logging;
pub mod now_playing;
pub mod playback;
pub mod settings;
pub mod state_sync;
pub mod system_metrics;
pub mod ui;
