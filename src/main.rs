use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use wallclock_ratui::audio_worker::{AudioBackend, spawn_audio_worker};
use wallclock_ratui::clock::{Clock, SystemClock};
use wallclock_ratui::error::AppError;
use wallclock_ratui::kiosk::{Kiosk, TickInput};
use wallclock_ratui::logging;
use wallclock_ratui::now_playing::{NOW_PLAYING_FILE, NowPlayingStore, load_record};
use wallclock_ratui::playback::spotify::auth::{parse_response_code, token_path};
use wallclock_ratui::playback::spotify::{SpotifyClient, SpotifyClientConfig};
use wallclock_ratui::playback::{PlaybackProvider, activate_device, spawn_playback_actor};
use wallclock_ratui::settings::{self, KioskSettings, load_credentials, load_settings};
use wallclock_ratui::state_sync::spawn_state_sync;
use wallclock_ratui::system_metrics::SysinfoMetrics;
use wallclock_ratui::ui::{Cli, Command, CrosstermEvents, EffectSink, Frontend, run_tui};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(settings::default_data_dir);

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), "wallclock-ratui 启动");

    let mut settings = load_settings(&data_dir);
    if let Some(v) = cli.device.clone() {
        settings.device_name = v;
    }
    if let Some(v) = cli.alarm_sound.clone() {
        settings.alarm_sound = Some(v);
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&cli, &data_dir, settings).await,
        Command::Authorize => {
            tracing::info!("启动模式: Authorize");
            let client = spotify_client(&cli, &data_dir)?;
            println!("在浏览器中打开以下链接并授权：\n{}", client.authorize_url());
            println!("授权后把跳转到的完整 URL 粘贴到这里：");
            let mut line = String::new();
            BufReader::new(tokio::io::stdin())
                .read_line(&mut line)
                .await?;
            let code = parse_response_code(line.trim())
                .ok_or_else(|| AppError::Other("回调 URL 中没有 code 参数".to_owned()))?;
            client.exchange_code(&code).await?;
            println!("授权完成");
            Ok(())
        }
        Command::Devices => {
            tracing::info!("启动模式: Devices");
            let client = spotify_client(&cli, &data_dir)?;
            for d in client.devices().await? {
                let mark = if d.is_active { "*" } else { " " };
                println!("{mark} {} ({})", d.name, d.id.as_deref().unwrap_or("-"));
            }
            Ok(())
        }
        Command::NowPlaying => {
            let r = load_record(&data_dir.join(NOW_PLAYING_FILE));
            println!("{} - {}", r.song_name, r.artist_name);
            Ok(())
        }
    }
}

fn spotify_client(cli: &Cli, data_dir: &Path) -> Result<SpotifyClient, AppError> {
    let creds = load_credentials(&cli.config)?;
    let cfg = SpotifyClientConfig::new(token_path(data_dir));
    Ok(SpotifyClient::new(cfg, creds)?)
}

async fn run(cli: &Cli, data_dir: &Path, settings: KioskSettings) -> Result<(), AppError> {
    let store = Arc::new(NowPlayingStore::open(data_dir));

    let (playback_tx, mut sync_handle) = if cli.offline {
        tracing::info!("离线模式：不连接播放服务");
        (None, None)
    } else {
        let client = Arc::new(spotify_client(cli, data_dir)?);
        if !client.has_token().await {
            tracing::warn!("尚未授权，先运行 `wallclock-ratui authorize`");
        }

        let activation = Arc::clone(&client);
        let device = settings.device_name.clone();
        let retries = settings.activation_retries;
        let delay = settings.activation_retry_delay();
        tokio::spawn(async move {
            activate_device(activation.as_ref(), &device, retries, delay).await;
        });

        let sync = spawn_state_sync(
            Arc::clone(&client),
            Arc::clone(&store),
            settings.poll_interval(),
        );
        (Some(spawn_playback_actor(client)), Some(sync))
    };

    let backend = if cli.no_audio {
        AudioBackend::Null
    } else {
        AudioBackend::Rodio {
            sound: settings.alarm_sound.clone(),
        }
    };
    let audio = spawn_audio_worker(backend)?;

    let clock = SystemClock::new();
    let start = TickInput {
        wall: clock.wall(),
        ticks_ms: clock.ticks_ms(),
    };
    let frontend = Frontend {
        kiosk: Kiosk::new(&settings, start),
        clock,
        events: CrosstermEvents::new(),
        metrics: SysinfoMetrics::new(),
        now_playing: store.reader(),
        effects: EffectSink::new(playback_tx, audio),
    };

    // raw 模式下按键 Ctrl+C 走事件；外部 SIGINT 在这里接住
    let result = tokio::select! {
        r = run_tui(frontend, settings.frame_period()) => r,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("收到 SIGINT，退出");
            Ok(())
        }
    };
    if let Some(h) = sync_handle.as_mut() {
        h.shutdown();
    }
    tracing::info!("wallclock-ratui 退出");
    result?;
    Ok(())
}
