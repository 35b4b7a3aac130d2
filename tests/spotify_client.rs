use mockito::{Matcher, Server};
use serde_json::json;
use std::path::Path;
use wallclock_ratui::error::SpotifyError;
use wallclock_ratui::playback::spotify::auth::{TokenInfo, load_token, save_token, token_path};
use wallclock_ratui::playback::spotify::{SpotifyClient, SpotifyClientConfig};
use wallclock_ratui::playback::{PlaybackProvider, PlayingType};
use wallclock_ratui::settings::Credentials;

fn creds() -> Credentials {
    Credentials {
        client_id: "cid".to_owned(),
        client_secret: "secret".to_owned(),
        redirect_uri: "http://localhost:8888/callback".to_owned(),
        username: "me".to_owned(),
    }
}

fn client(server: &Server, data_dir: &Path, token: Option<TokenInfo>) -> SpotifyClient {
    let path = token_path(data_dir);
    if let Some(t) = token {
        save_token(&path, &t).expect("save token");
    }
    let mut cfg = SpotifyClientConfig::new(path);
    cfg.api_base = server.url();
    cfg.accounts_base = server.url();
    SpotifyClient::new(cfg, creds()).expect("client")
}

fn valid_token() -> TokenInfo {
    TokenInfo {
        access_token: "tok".to_owned(),
        refresh_token: Some("r".to_owned()),
        expires_at: chrono::Utc::now().timestamp() + 3600,
        scope: None,
    }
}

#[tokio::test]
async fn currently_playing_track_uses_first_artist() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let m = server
        .mock("GET", "/me/player/currently-playing")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "currently_playing_type": "track",
                "is_playing": true,
                "item": {"name": "Song", "artists": [{"name": "First"}, {"name": "Second"}]}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let c = client(&server, dir.path(), Some(valid_token()));
    let playing = c.currently_playing().await.expect("ok").expect("some");
    assert_eq!(playing.kind, PlayingType::Track);
    assert_eq!(playing.item_name.as_deref(), Some("Song"));
    assert_eq!(playing.primary_artist.as_deref(), Some("First"));
    m.assert_async().await;
}

#[tokio::test]
async fn episode_and_no_content() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let c = client(&server, dir.path(), Some(valid_token()));

    let episode = server
        .mock("GET", "/me/player/currently-playing")
        .with_status(200)
        .with_body(
            json!({"currently_playing_type": "episode", "item": {"name": "Ep 1"}}).to_string(),
        )
        .create_async()
        .await;
    let playing = c.currently_playing().await.expect("ok").expect("some");
    assert_eq!(playing.kind, PlayingType::Episode);
    assert!(playing.primary_artist.is_none());
    episode.remove_async().await;

    let idle = server
        .mock("GET", "/me/player/currently-playing")
        .with_status(204)
        .create_async()
        .await;
    assert!(c.currently_playing().await.expect("ok").is_none());
    idle.assert_async().await;
}

#[tokio::test]
async fn server_error_is_reported_as_status() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    server
        .mock("GET", "/me/player")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let c = client(&server, dir.path(), Some(valid_token()));
    match c.playback_status().await {
        Err(SpotifyError::Status { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn missing_token_is_not_authorized() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let c = client(&server, dir.path(), None);
    assert!(!c.has_token().await);
    let err = c.next().await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_cached() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let refresh = server
        .mock("POST", "/api/token")
        .match_header("authorization", Matcher::Regex("^Basic ".to_owned()))
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".to_owned(), "refresh_token".to_owned()),
            Matcher::UrlEncoded("refresh_token".to_owned(), "r".to_owned()),
        ]))
        .with_status(200)
        .with_body(json!({"access_token": "fresh", "expires_in": 3600}).to_string())
        .create_async()
        .await;
    let status = server
        .mock("GET", "/me/player")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(json!({"is_playing": true}).to_string())
        .create_async()
        .await;

    let expired = TokenInfo {
        expires_at: 0,
        ..valid_token()
    };
    let c = client(&server, dir.path(), Some(expired));
    let s = c.playback_status().await.expect("ok").expect("some");
    assert!(s.is_playing);
    refresh.assert_async().await;
    status.assert_async().await;

    let cached = load_token(&token_path(dir.path())).expect("load").expect("some");
    assert_eq!(cached.access_token, "fresh");
    assert_eq!(cached.refresh_token.as_deref(), Some("r"));
}

#[tokio::test]
async fn transfer_and_transport_commands() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let transfer = server
        .mock("PUT", "/me/player")
        .match_body(Matcher::Json(json!({"device_ids": ["abc"], "play": false})))
        .with_status(204)
        .create_async()
        .await;
    let next = server
        .mock("POST", "/me/player/next")
        .with_status(204)
        .create_async()
        .await;
    let pause = server
        .mock("PUT", "/me/player/pause")
        .with_status(403)
        .with_body("restricted")
        .create_async()
        .await;
    let devices = server
        .mock("GET", "/me/player/devices")
        .with_status(200)
        .with_body(
            json!({"devices": [
                {"id": "abc", "name": "Pi 5", "is_active": false},
                {"id": null, "name": "Restricted", "is_active": true}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let c = client(&server, dir.path(), Some(valid_token()));
    c.transfer_playback("abc", false).await.expect("transfer");
    c.next().await.expect("next");
    assert!(matches!(
        c.pause().await,
        Err(SpotifyError::Status { status: 403, .. })
    ));
    let list = c.devices().await.expect("devices");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id.as_deref(), Some("abc"));
    assert!(list[1].id.is_none() && list[1].is_active);

    transfer.assert_async().await;
    next.assert_async().await;
    pause.assert_async().await;
    devices.assert_async().await;
}
