use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Spotify 应用凭据
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    spotify_credentials: Credentials,
}

/// 读取 `{"spotify_credentials": {...}}`；文件缺失、格式错误或字段为空都是启动期致命错误
pub fn load_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CredentialsFile =
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let creds = file.spotify_credentials;

    for (name, value) in [
        ("client_id", &creds.client_id),
        ("client_secret", &creds.client_secret),
        ("redirect_uri", &creds.redirect_uri),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(name));
        }
    }
    Ok(creds)
}
