use super::dto::TokenResp;
use crate::error::SpotifyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const TOKEN_FILE: &str = "token_info.json";

/// 读取当前播放、读取/修改播放状态所需的授权范围
pub const SCOPES: &str =
    "user-read-currently-playing user-read-playback-state user-modify-playback-state";

/// 距离过期不足该秒数时提前刷新
const REFRESH_MARGIN_SECS: i64 = 60;

/// token 缓存（字段名与常见 Spotify 客户端的缓存文件保持一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix 秒
    pub expires_at: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenInfo {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expires_at - REFRESH_MARGIN_SECS <= now_secs
    }

    /// 用刷新/换取接口的响应生成新 token；响应里没有 refresh_token 时沿用旧的
    pub(super) fn from_response(
        resp: TokenResp,
        previous_refresh: Option<String>,
        now_secs: i64,
    ) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token.or(previous_refresh),
            expires_at: now_secs + resp.expires_in,
            scope: resp.scope,
        }
    }
}

pub fn token_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TOKEN_FILE)
}

/// 缓存不存在时返回 Ok(None)
pub fn load_token(path: &Path) -> Result<Option<TokenInfo>, SpotifyError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

pub fn save_token(path: &Path, token: &TokenInfo) -> Result<(), SpotifyError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(token)?)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SpotifyError::Io(e));
    }
    Ok(())
}

pub fn authorize_url(accounts_base: &str, client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{accounts_base}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(SCOPES),
    )
}

/// 从授权后跳转的 URL 里取出 `code` 参数
pub fn parse_response_code(redirected: &str) -> Option<String> {
    let query = redirected.trim().split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "code")
        .and_then(|(_, v)| urlencoding::decode(v).ok())
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}
