use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "wallclock-ratui.log";
const FALLBACK_DIR_NAME: &str = "wallclock-ratui-logs";
const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// 持有非阻塞写入线程，drop 时刷盘
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// 终端归 TUI 使用，日志只写文件（按天滚动）
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = prepare_log_dir(cfg.dir.unwrap_or_else(|| data_dir.join("logs")));

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(cfg.filter.as_deref()))
        .with(file_layer);

    let _ = subscriber.try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing 已初始化");

    LogGuard(Some(guard))
}

fn prepare_log_dir(preferred: PathBuf) -> PathBuf {
    if fs::create_dir_all(&preferred).is_ok() {
        return preferred;
    }
    let fallback = std::env::temp_dir().join(FALLBACK_DIR_NAME);
    let _ = fs::create_dir_all(&fallback);
    fallback
}

fn build_filter(explicit: Option<&str>) -> EnvFilter {
    match explicit {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}
