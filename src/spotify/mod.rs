//! # Spotify Integration Module
//!
//! HTTP layer between the history engine and the Spotify Web API.
//!
//! ```text
//! ContextHistoryTracker
//!          ↓  PlaybackApi
//! SpotifyApi
//!     ├── recently_played  GET /me/player/recently-played
//!     ├── contexts         GET /albums, /artists, /playlists/{id}
//!     └── player           PUT /me/player/play
//!          ↓
//! reqwest (bearer token from TokenManager)
//! ```
//!
//! [`auth`] implements the OAuth 2.0 PKCE flow used by `sporlctx auth`.
//!
//! ## Retries
//!
//! Every request goes through [`SpotifyApi::send`]:
//! - `502 Bad Gateway` is retried after 10 seconds,
//! - `429 Too Many Requests` waits for `Retry-After` when it is at most 120
//!   seconds, otherwise the error is returned with a warning.
//!
//! Retries stop after [`MAX_ATTEMPTS`]. The history engine itself never
//! retries; whatever error is left after this layer is final for the cycle.

pub mod auth;
mod contexts;
mod player;
mod recently_played;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::{sync::Mutex, time::sleep};

use crate::{
    Res, config,
    history::{ContextId, ContextKind, Cursor, PlaybackApi},
    management::TokenManager,
    types::{Context, PlayRequest, RecentlyPlayedPage},
    warning,
};

pub const MAX_ATTEMPTS: usize = 3;

const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

pub struct SpotifyApi {
    client: Client,
    base_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyApi {
    pub fn new(tokens: TokenManager) -> Self {
        Self::with_base_url(tokens, config::spotify_apiurl())
    }

    pub fn with_base_url(tokens: TokenManager, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Uses the token stored by `sporlctx auth`.
    pub async fn from_cache() -> Res<Self> {
        let tokens = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token. Please run sporlctx auth\n Error: {}", e))?;
        Ok(Self::new(tokens))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> String {
        self.tokens.lock().await.get_valid_token().await
    }

    /// Sends the request built by `build` with a fresh bearer token and
    /// handles 502/429 responses.
    async fn send<F>(&self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            let token = self.token().await;
            let response = build(&self.client).bearer_auth(token).send().await?;

            if attempt < MAX_ATTEMPTS {
                match response.status() {
                    StatusCode::BAD_GATEWAY => {
                        sleep(BAD_GATEWAY_DELAY).await;
                        attempt += 1;
                        continue;
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        let retry_after = retry_after_secs(&response);
                        if retry_after <= MAX_RETRY_AFTER_SECS {
                            sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. \
                             Try again later.",
                            retry_after
                        );
                    }
                    _ => {}
                }
            }

            return response.error_for_status();
        }
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1)
}

#[async_trait]
impl PlaybackApi for SpotifyApi {
    async fn recently_played(
        &self,
        after: Option<&Cursor>,
        limit: u32,
    ) -> Res<RecentlyPlayedPage> {
        Ok(self.get_recently_played(after, limit).await?)
    }

    async fn fetch_contexts(
        &self,
        kind: ContextKind,
        ids: &[ContextId],
    ) -> Res<Vec<Option<Context>>> {
        let ids: Vec<&str> = ids.iter().map(ContextId::as_str).collect();

        match kind {
            ContextKind::Album => Ok(self
                .get_several_albums(&ids)
                .await?
                .into_iter()
                .map(|album| album.map(Context::Album))
                .collect()),
            ContextKind::Artist => Ok(self
                .get_several_artists(&ids)
                .await?
                .into_iter()
                .map(|artist| artist.map(Context::Artist))
                .collect()),
            ContextKind::Playlist => {
                Err("Spotify has no endpoint to get several playlists at once".into())
            }
        }
    }

    async fn fetch_context(&self, kind: ContextKind, id: &ContextId) -> Res<Context> {
        let context = match kind {
            ContextKind::Album => Context::Album(self.get_album(id.as_str()).await?),
            ContextKind::Artist => Context::Artist(self.get_artist(id.as_str()).await?),
            ContextKind::Playlist => Context::Playlist(self.get_playlist(id.as_str()).await?),
        };
        Ok(context)
    }

    async fn play(&self, request: &PlayRequest) -> Res<()> {
        Ok(self.start_playback(request).await?)
    }
}
