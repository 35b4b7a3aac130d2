use rodio::OutputStreamBuilder;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use super::messages::AlarmAudioCommand;
use super::player::AlarmPlayer;
use crate::error::AudioError;

#[derive(Debug, Clone)]
pub enum AudioBackend {
    /// 系统默认输出设备
    Rodio { sound: Option<PathBuf> },
    /// 不出声，只记录命令（`--no-audio`）
    Null,
}

/// 发往铃声线程的句柄；线程在句柄全部 drop 后退出
#[derive(Debug, Clone)]
pub struct AlarmAudio {
    tx: mpsc::Sender<AlarmAudioCommand>,
}

impl AlarmAudio {
    /// 不启动线程，命令由调用方直接接收
    pub fn detached() -> (Self, mpsc::Receiver<AlarmAudioCommand>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, cmd: AlarmAudioCommand) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!(?cmd, "铃声线程已退出，命令丢弃");
        }
    }
}

/// 启动铃声线程；输出设备打不开时返回错误（启动期致命）
pub fn spawn_audio_worker(backend: AudioBackend) -> Result<AlarmAudio, AudioError> {
    let (tx_cmd, rx_cmd) = mpsc::channel::<AlarmAudioCommand>();
    let (tx_ready, rx_ready) = mpsc::sync_channel::<Result<(), AudioError>>(1);

    thread::Builder::new()
        .name("alarm-audio".to_owned())
        .spawn(move || match backend {
            AudioBackend::Null => {
                let _ = tx_ready.send(Ok(()));
                tracing::info!("AudioWorker 已启动（静音模式）");
                run_null(rx_cmd);
            }
            AudioBackend::Rodio { sound } => {
                let stream = match OutputStreamBuilder::open_default_stream() {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::error!(err = %e, "初始化音频输出失败");
                        let _ = tx_ready.send(Err(AudioError::OutputStream(e.to_string())));
                        return;
                    }
                };
                let _ = tx_ready.send(Ok(()));
                tracing::info!(sound = ?sound, "AudioWorker 已启动");
                let mut player = AlarmPlayer::new(stream, sound);
                while let Ok(cmd) = rx_cmd.recv() {
                    match cmd {
                        AlarmAudioCommand::Start => player.start(),
                        AlarmAudioCommand::Stop => player.stop(),
                    }
                }
                player.stop();
            }
        })
        .map_err(|e| AudioError::OutputStream(format!("创建音频线程失败: {e}")))?;

    match rx_ready.recv() {
        Ok(Ok(())) => Ok(AlarmAudio { tx: tx_cmd }),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(AudioError::OutputStream("音频线程意外退出".to_owned())),
    }
}

fn run_null(rx_cmd: mpsc::Receiver<AlarmAudioCommand>) {
    let mut ringing = false;
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            AlarmAudioCommand::Start if !ringing => {
                ringing = true;
                tracing::info!("（静音）铃声开始");
            }
            AlarmAudioCommand::Stop if ringing => {
                ringing = false;
                tracing::info!("（静音）铃声停止");
            }
            _ => {}
        }
    }
}
