use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct CurrentlyPlayingResp {
    #[serde(default)]
    pub currently_playing_type: Option<String>,
    #[serde(default)]
    pub item: Option<ItemDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtistDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DevicesResp {
    #[serde(default)]
    pub devices: Vec<DeviceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeviceDto {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaybackStateResp {
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResp {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
