#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAudioCommand {
    /// 开始循环播放铃声；已经在响时忽略
    Start,
    /// 停止铃声；幂等
    Stop,
}
