//! Spotify Web API 客户端（bearer token + refresh token 续期）

pub mod auth;
mod dto;

use super::{CurrentlyPlaying, Device, PlaybackProvider, PlaybackStatus, PlayingType};
use crate::error::SpotifyError;
use crate::settings::Credentials;
use auth::TokenInfo;
use dto::{CurrentlyPlayingResp, DevicesResp, PlaybackStateResp, TokenResp};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;

pub const API_BASE: &str = "https://api.spotify.com/v1";
pub const ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

#[derive(Debug, Clone)]
pub struct SpotifyClientConfig {
    pub api_base: String,
    pub accounts_base: String,
    pub token_path: PathBuf,
    pub timeout: Duration,
}

impl SpotifyClientConfig {
    pub fn new(token_path: PathBuf) -> Self {
        Self {
            api_base: API_BASE.to_owned(),
            accounts_base: ACCOUNTS_BASE.to_owned(),
            token_path,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub struct SpotifyClient {
    http: reqwest::Client,
    cfg: SpotifyClientConfig,
    creds: Credentials,
    token: Mutex<Option<TokenInfo>>,
}

impl SpotifyClient {
    pub fn new(cfg: SpotifyClientConfig, creds: Credentials) -> Result<Self, SpotifyError> {
        let http = reqwest::Client::builder()
            .user_agent("wallclock-ratui")
            .timeout(cfg.timeout)
            .build()?;
        let token = auth::load_token(&cfg.token_path)?;
        if token.is_none() {
            tracing::warn!(path = %cfg.token_path.display(), "未找到 token 缓存");
        }
        Ok(Self {
            http,
            cfg,
            creds,
            token: Mutex::new(token),
        })
    }

    pub fn authorize_url(&self) -> String {
        auth::authorize_url(
            &self.cfg.accounts_base,
            &self.creds.client_id,
            &self.creds.redirect_uri,
        )
    }

    pub async fn has_token(&self) -> bool {
        self.token.lock().await.is_some()
    }

    // ========== Auth ==========

    /// 用授权码换取 token 并写入缓存
    pub async fn exchange_code(&self, code: &str) -> Result<(), SpotifyError> {
        let resp = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.creds.redirect_uri.as_str()),
            ])
            .await?;
        let token = TokenInfo::from_response(resp, None, now_secs());
        auth::save_token(&self.cfg.token_path, &token)?;
        *self.token.lock().await = Some(token);
        tracing::info!(user = %self.creds.username, "授权完成，token 已缓存");
        Ok(())
    }

    async fn access_token(&self) -> Result<String, SpotifyError> {
        let mut guard = self.token.lock().await;
        let Some(token) = guard.as_ref() else {
            return Err(SpotifyError::NotAuthorized);
        };
        if !token.is_expired_at(now_secs()) {
            return Ok(token.access_token.clone());
        }

        let Some(refresh) = token.refresh_token.clone() else {
            return Err(SpotifyError::Auth("token 已过期且没有 refresh_token".to_owned()));
        };
        tracing::debug!("access token 过期，刷新中");
        let resp = self
            .token_request(&[("grant_type", "refresh_token"), ("refresh_token", refresh.as_str())])
            .await?;
        let fresh = TokenInfo::from_response(resp, Some(refresh), now_secs());
        if let Err(e) = auth::save_token(&self.cfg.token_path, &fresh) {
            tracing::warn!(err = %e, "写入 token 缓存失败");
        }
        let access = fresh.access_token.clone();
        *guard = Some(fresh);
        Ok(access)
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResp, SpotifyError> {
        let resp = self
            .http
            .post(format!("{}/api/token", self.cfg.accounts_base))
            .basic_auth(&self.creds.client_id, Some(&self.creds.client_secret))
            .form(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpotifyError::Auth(format!("status={} body={body}", status.as_u16())));
        }
        Ok(resp.json::<TokenResp>().await?)
    }

    // ========== Requests ==========

    /// 204 No Content 返回 Ok(None)
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<reqwest::Response>, SpotifyError> {
        let token = self.access_token().await?;
        let mut req = self
            .http
            .request(method.clone(), format!("{}{path}", self.cfg.api_base))
            .bearer_auth(token);
        req = match body {
            Some(b) => req.json(&b),
            None if method != Method::GET => req.header(CONTENT_LENGTH, 0),
            None => req,
        };

        let resp = req.send().await?;
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(%method, path, status = status.as_u16(), "Spotify 请求失败");
            return Err(SpotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(Some(resp))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, SpotifyError> {
        let Some(resp) = self.request(Method::GET, path, None).await? else {
            return Ok(None);
        };
        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), SpotifyError> {
        self.request(method, path, body).await.map(|_| ())
    }
}

impl PlaybackProvider for SpotifyClient {
    async fn devices(&self) -> Result<Vec<Device>, SpotifyError> {
        let resp: Option<DevicesResp> = self.get_json("/me/player/devices").await?;
        Ok(resp
            .map(|r| r.devices)
            .unwrap_or_default()
            .into_iter()
            .map(|d| Device {
                id: d.id,
                name: d.name,
                is_active: d.is_active,
            })
            .collect())
    }

    async fn transfer_playback(&self, device_id: &str, play: bool) -> Result<(), SpotifyError> {
        self.command(
            Method::PUT,
            "/me/player",
            Some(json!({ "device_ids": [device_id], "play": play })),
        )
        .await
    }

    async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>, SpotifyError> {
        let resp: Option<CurrentlyPlayingResp> =
            self.get_json("/me/player/currently-playing").await?;
        Ok(resp.map(|r| {
            let kind = r
                .currently_playing_type
                .as_deref()
                .map(PlayingType::from_api)
                .unwrap_or(PlayingType::Unknown);
            let (item_name, primary_artist) = match r.item {
                Some(item) => (item.name, item.artists.into_iter().next().map(|a| a.name)),
                None => (None, None),
            };
            CurrentlyPlaying {
                kind,
                item_name,
                primary_artist,
            }
        }))
    }

    async fn playback_status(&self) -> Result<Option<PlaybackStatus>, SpotifyError> {
        let resp: Option<PlaybackStateResp> = self.get_json("/me/player").await?;
        Ok(resp.map(|r| PlaybackStatus {
            is_playing: r.is_playing,
        }))
    }

    async fn pause(&self) -> Result<(), SpotifyError> {
        self.command(Method::PUT, "/me/player/pause", None).await
    }

    async fn resume(&self) -> Result<(), SpotifyError> {
        self.command(Method::PUT, "/me/player/play", None).await
    }

    async fn previous(&self) -> Result<(), SpotifyError> {
        self.command(Method::POST, "/me/player/previous", None).await
    }

    async fn next(&self) -> Result<(), SpotifyError> {
        self.command(Method::POST, "/me/player/next", None).await
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
