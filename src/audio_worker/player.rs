use rodio::mixer::Mixer;
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::AudioError;

const FALLBACK_TONE_HZ: f32 = 880.0;
const FALLBACK_TONE_GAIN: f32 = 0.2;

type BoxedSource = Box<dyn Source + Send>;

/// 持有输出流和当前铃声 Sink
pub struct AlarmPlayer {
    mixer: Mixer,
    #[allow(dead_code)]
    stream: OutputStream,
    sound: Option<PathBuf>,
    sink: Option<Sink>,
}

impl AlarmPlayer {
    pub fn new(mut stream: OutputStream, sound: Option<PathBuf>) -> Self {
        stream.log_on_drop(false);
        let mixer = stream.mixer().clone();
        Self {
            mixer,
            stream,
            sound,
            sink: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.sink.is_some()
    }

    pub fn start(&mut self) {
        if self.is_playing() {
            tracing::debug!("铃声已在播放，忽略 Start");
            return;
        }
        let sink = Sink::connect_new(&self.mixer);
        sink.append(alarm_source(self.sound.as_deref()));
        sink.play();
        self.sink = Some(sink);
        tracing::info!("铃声开始循环播放");
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            tracing::info!("铃声已停止");
        }
    }
}

/// 铃声音源：优先循环播放配置的文件，失败时退回到正弦提示音
pub fn alarm_source(sound: Option<&Path>) -> BoxedSource {
    match sound.map(decode_looped) {
        Some(Ok(src)) => src,
        Some(Err(e)) => {
            tracing::warn!(err = %e, "铃声文件不可用，改用提示音");
            fallback_tone()
        }
        None => fallback_tone(),
    }
}

fn decode_looped(path: &Path) -> Result<BoxedSource, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Box::new(decoder.repeat_infinite()))
}

fn fallback_tone() -> BoxedSource {
    Box::new(SineWave::new(FALLBACK_TONE_HZ).amplify(FALLBACK_TONE_GAIN))
}
