use super::PlaybackProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// 传输控制按钮对应的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Previous,
    TogglePlayPause,
    Next,
}

/// 启动播放命令 actor；渲染循环只做非阻塞的 try_send
pub fn spawn_playback_actor<P: PlaybackProvider>(
    provider: Arc<P>,
) -> mpsc::Sender<TransportCommand> {
    let (tx, mut rx) = mpsc::channel::<TransportCommand>(16);

    tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            run_command(provider.as_ref(), cmd).await;
        }
        tracing::debug!("PlaybackActor 退出");
    });

    tx
}

pub(crate) async fn run_command<P: PlaybackProvider>(provider: &P, cmd: TransportCommand) {
    tracing::debug!(?cmd, "执行播放命令");
    let result = match cmd {
        TransportCommand::Previous => provider.previous().await,
        TransportCommand::Next => provider.next().await,
        TransportCommand::TogglePlayPause => {
            // 以远端状态为准；查询失败按“未在播放”处理
            let playing = match provider.playback_status().await {
                Ok(status) => status.is_some_and(|s| s.is_playing),
                Err(e) => {
                    tracing::warn!(err = %e, "查询播放状态失败");
                    false
                }
            };
            if playing {
                provider.pause().await
            } else {
                provider.resume().await
            }
        }
    };
    match result {
        Ok(()) => {}
        Err(e) if e.is_auth_error() => {
            tracing::warn!(?cmd, err = %e, "播放命令未授权，请运行 `wallclock-ratui authorize`");
        }
        Err(e) => tracing::warn!(?cmd, err = %e, "播放命令失败，已忽略"),
    }
}

/// 按名称查找设备并转移播放（不自动开始），最多尝试 `retries` 次，每次间隔 `delay`
///
/// 只在启动时调用；用尽重试后放弃本次运行。认证错误重试无意义，直接放弃。
pub async fn activate_device<P: PlaybackProvider>(
    provider: &P,
    device_name: &str,
    retries: u32,
    delay: Duration,
) -> bool {
    for attempt in 1..=retries {
        match provider.devices().await {
            Ok(devices) => {
                let id = devices
                    .iter()
                    .find(|d| d.name == device_name)
                    .and_then(|d| d.id.clone());
                if let Some(id) = id {
                    match provider.transfer_playback(&id, false).await {
                        Ok(()) => {
                            tracing::info!(device = device_name, "播放已转移到设备");
                            return true;
                        }
                        Err(e) => {
                            tracing::warn!(device = device_name, attempt, err = %e, "转移播放失败");
                        }
                    }
                } else {
                    tracing::info!(device = device_name, attempt, "未找到设备，稍后重试");
                }
            }
            Err(e) if e.is_auth_error() => {
                tracing::warn!(
                    err = %e,
                    "未授权，放弃激活设备；请运行 `wallclock-ratui authorize`"
                );
                return false;
            }
            Err(e) => {
                tracing::warn!(device = device_name, attempt, err = %e, "获取设备列表失败");
            }
        }
        if attempt < retries {
            tokio::time::sleep(delay).await;
        }
    }
    tracing::warn!(device = device_name, retries, "激活设备失败，已放弃");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpotifyError;
    use crate::playback::{CurrentlyPlaying, Device, PlaybackStatus};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        calls: Mutex<Vec<&'static str>>,
        playing: Option<bool>,
        status_fails: bool,
        unauthorized: bool,
        device_after: u32,
        device_queries: AtomicU32,
    }

    impl FakeProvider {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().expect("lock").clone()
        }

        fn record(&self, name: &'static str) {
            self.calls.lock().expect("lock").push(name);
        }
    }

    impl PlaybackProvider for FakeProvider {
        async fn devices(&self) -> Result<Vec<Device>, SpotifyError> {
            let n = self.device_queries.fetch_add(1, Ordering::SeqCst) + 1;
            if self.unauthorized {
                return Err(SpotifyError::Status {
                    status: 401,
                    body: String::new(),
                });
            }
            if n < self.device_after {
                return Ok(vec![Device {
                    id: Some("other".to_owned()),
                    name: "Laptop".to_owned(),
                    is_active: true,
                }]);
            }
            Ok(vec![Device {
                id: Some("pi".to_owned()),
                name: "Pi 5".to_owned(),
                is_active: false,
            }])
        }

        async fn transfer_playback(&self, device_id: &str, play: bool) -> Result<(), SpotifyError> {
            assert_eq!(device_id, "pi");
            assert!(!play);
            self.record("transfer");
            Ok(())
        }

        async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>, SpotifyError> {
            Ok(None)
        }

        async fn playback_status(&self) -> Result<Option<PlaybackStatus>, SpotifyError> {
            if self.status_fails {
                return Err(SpotifyError::Status {
                    status: 502,
                    body: String::new(),
                });
            }
            Ok(self.playing.map(|is_playing| PlaybackStatus { is_playing }))
        }

        async fn pause(&self) -> Result<(), SpotifyError> {
            self.record("pause");
            Ok(())
        }

        async fn resume(&self) -> Result<(), SpotifyError> {
            self.record("resume");
            Ok(())
        }

        async fn previous(&self) -> Result<(), SpotifyError> {
            self.record("previous");
            Err(SpotifyError::NotAuthorized)
        }

        async fn next(&self) -> Result<(), SpotifyError> {
            self.record("next");
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_toggle_pauses_when_playing() {
        let p = FakeProvider {
            playing: Some(true),
            ..Default::default()
        };
        run_command(&p, TransportCommand::TogglePlayPause).await;
        assert_eq!(p.calls(), vec!["pause"]);
    }

    #[tokio::test]
    async fn test_toggle_resumes_when_paused_or_idle() {
        let paused = FakeProvider {
            playing: Some(false),
            ..Default::default()
        };
        run_command(&paused, TransportCommand::TogglePlayPause).await;
        assert_eq!(paused.calls(), vec!["resume"]);

        let idle = FakeProvider::default();
        run_command(&idle, TransportCommand::TogglePlayPause).await;
        assert_eq!(idle.calls(), vec!["resume"]);

        let failing = FakeProvider {
            status_fails: true,
            ..Default::default()
        };
        run_command(&failing, TransportCommand::TogglePlayPause).await;
        assert_eq!(failing.calls(), vec!["resume"]);
    }

    #[tokio::test]
    async fn test_command_error_is_swallowed() {
        let p = FakeProvider::default();
        run_command(&p, TransportCommand::Previous).await;
        run_command(&p, TransportCommand::Next).await;
        assert_eq!(p.calls(), vec!["previous", "next"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_device_retries_until_found() {
        let p = FakeProvider {
            device_after: 3,
            ..Default::default()
        };
        assert!(activate_device(&p, "Pi 5", 5, Duration::from_secs(5)).await);
        assert_eq!(p.device_queries.load(Ordering::SeqCst), 3);
        assert_eq!(p.calls(), vec!["transfer"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_device_gives_up() {
        let p = FakeProvider {
            device_after: u32::MAX,
            ..Default::default()
        };
        assert!(!activate_device(&p, "Pi 5", 5, Duration::from_secs(5)).await);
        assert_eq!(p.device_queries.load(Ordering::SeqCst), 5);
        assert!(p.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_device_stops_on_auth_error() {
        let p = FakeProvider {
            unauthorized: true,
            ..Default::default()
        };
        assert!(!activate_device(&p, "Pi 5", 5, Duration::from_secs(5)).await);
        assert_eq!(p.device_queries.load(Ordering::SeqCst), 1);
        assert!(p.calls().is_empty());
    }

    #[tokio::test]
    async fn test_actor_forwards_commands() {
        let p = Arc::new(FakeProvider::default());
        let tx = spawn_playback_actor(Arc::clone(&p));
        tx.send(TransportCommand::Next).await.expect("send");
        drop(tx);
        for _ in 0..50 {
            if !p.calls().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(p.calls(), vec!["next"]);
    }
}
