use super::guard::TuiGuard;
use super::views::draw_ui;
use crate::audio_worker::{AlarmAudio, AlarmAudioCommand};
use crate::clock::Clock;
use crate::kiosk::{EventSource, Kiosk, KioskEffect, KioskLayout, MetricsSource, TickInput};
use crate::now_playing::NowPlayingReader;
use crate::playback::TransportCommand;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// 单个 tick 最多处理的输入事件数
const MAX_EVENTS_PER_TICK: usize = 64;

/// 把 tick 产生的副作用转发出去，全部非阻塞
pub struct EffectSink {
    playback: Option<mpsc::Sender<TransportCommand>>,
    audio: AlarmAudio,
}

impl EffectSink {
    pub fn new(playback: Option<mpsc::Sender<TransportCommand>>, audio: AlarmAudio) -> Self {
        Self { playback, audio }
    }

    pub fn forward(&self, effects: Vec<KioskEffect>) {
        for effect in effects {
            match effect {
                KioskEffect::StartAlarm => self.audio.send(AlarmAudioCommand::Start),
                KioskEffect::StopAlarm => self.audio.send(AlarmAudioCommand::Stop),
                KioskEffect::Playback(cmd) => self.send_playback(cmd),
            }
        }
    }

    fn send_playback(&self, cmd: TransportCommand) {
        let Some(tx) = self.playback.as_ref() else {
            tracing::debug!(?cmd, "离线模式，忽略播放命令");
            return;
        };
        match tx.try_send(cmd) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(cmd)) => {
                tracing::warn!(?cmd, "播放命令队列已满，丢弃");
            }
            Err(mpsc::error::TrySendError::Closed(cmd)) => {
                tracing::warn!(?cmd, "播放 actor 已退出，丢弃");
            }
        }
    }
}

/// 渲染循环持有的全部状态；`step` 不碰终端，方便测试
pub struct Frontend<C, E, M> {
    pub kiosk: Kiosk,
    pub clock: C,
    pub events: E,
    pub metrics: M,
    pub now_playing: NowPlayingReader,
    pub effects: EffectSink,
}

impl<C: Clock, E: EventSource, M: MetricsSource> Frontend<C, E, M> {
    /// 推进一个 tick，返回是否应退出
    pub fn step(&mut self, layout: &KioskLayout) -> bool {
        let now = TickInput {
            wall: self.clock.wall(),
            ticks_ms: self.clock.ticks_ms(),
        };
        let batch = self.events.drain(MAX_EVENTS_PER_TICK);
        let outcome = self.kiosk.tick(now, batch, layout, &mut self.metrics);
        self.effects.forward(outcome.effects);
        outcome.quit
    }
}

/// 主 TUI 入口点 - 从 main.rs 调用
pub async fn run_tui<C, E, M>(
    mut frontend: Frontend<C, E, M>,
    frame_period: Duration,
) -> io::Result<()>
where
    C: Clock,
    E: EventSource,
    M: MetricsSource,
{
    let _guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut ticker = tokio::time::interval(frame_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!(frame_ms = frame_period.as_millis() as u64, "渲染循环启动");

    loop {
        ticker.tick().await;

        let size = terminal.size()?;
        let layout = KioskLayout::new(Rect::new(0, 0, size.width, size.height));
        let quit = frontend.step(&layout);

        let record = frontend.now_playing.current();
        let view = frontend.kiosk.view();
        terminal.draw(|f| draw_ui(f, &layout, &view, &record))?;

        if quit {
            break;
        }
    }

    tracing::info!("渲染循环结束");
    Ok(())
}
