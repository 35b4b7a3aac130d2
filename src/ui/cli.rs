use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "wallclock-ratui",
    version,
    about = "终端挂钟：闹钟 + 正在播放（Rust + ratatui）"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "WALLCLOCK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Spotify 凭据文件
    #[arg(long, env = "WALLCLOCK_CONFIG", default_value = "spotify_config.json")]
    pub config: PathBuf,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "WALLCLOCK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 启动时激活的播放设备名（覆盖 settings.json）
    #[arg(long)]
    pub device: Option<String>,

    /// 铃声文件（覆盖 settings.json；不设置时使用提示音）
    #[arg(long)]
    pub alarm_sound: Option<PathBuf>,

    /// 不输出声音，只记录日志
    #[arg(long, env = "WALLCLOCK_NO_AUDIO")]
    pub no_audio: bool,

    /// 不连接播放服务
    #[arg(long)]
    pub offline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// 运行挂钟 TUI（默认）
    Run,

    /// 打印授权链接，读取回调 URL 并缓存 token
    Authorize,

    /// 列出可用的播放设备
    Devices,

    /// 打印持久化的正在播放记录
    NowPlaying,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wallclock-ratui"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("spotify_config.json"));
        assert!(!cli.offline);
    }

    #[test]
    fn test_flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "wallclock-ratui",
            "--device",
            "Kitchen",
            "--offline",
            "--alarm-sound",
            "/tmp/bell.mp3",
            "devices",
        ])
        .expect("parse");
        assert_eq!(cli.command, Some(Command::Devices));
        assert_eq!(cli.device.as_deref(), Some("Kitchen"));
        assert_eq!(cli.alarm_sound, Some(PathBuf::from("/tmp/bell.mp3")));
        assert!(cli.offline);
    }

    #[test]
    fn test_now_playing_subcommand_name() {
        let cli = Cli::try_parse_from(["wallclock-ratui", "now-playing"]).expect("parse");
        assert_eq!(cli.command, Some(Command::NowPlaying));
    }
}
