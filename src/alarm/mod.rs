mod bell;
mod registry;

pub use bell::{AlarmBell, SoundState};
pub use registry::{AlarmRegistry, AlarmTime, parse_alarm_time};
