use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful `POST /api/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// The context a track was played in, as reported by the recently played endpoint.
///
/// `kind` is the raw `type` field. Spotify has versioned it before
/// (`playlist` became `playlist_v2`) and sometimes omits it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayContext {
    pub uri: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Track,
    pub played_at: DateTime<Utc>,
    #[serde(default)]
    pub context: Option<PlayContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// One page of `/me/player/recently-played`.
///
/// Both fields are optional on purpose: a page without `items` counts as an
/// empty page and a page without `cursors.after` is the last one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentlyPlayedPage {
    #[serde(default)]
    pub items: Option<Vec<PlayHistoryItem>>,
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

impl RecentlyPlayedPage {
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursors.as_ref().and_then(|c| c.after.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<Album>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

/// Full metadata of a context a track was played in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Context {
    Album(Album),
    Artist(Artist),
    Playlist(Playlist),
}

impl Context {
    pub fn id(&self) -> &str {
        match self {
            Context::Album(album) => &album.id,
            Context::Artist(artist) => &artist.id,
            Context::Playlist(playlist) => &playlist.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Context::Album(album) => &album.name,
            Context::Artist(artist) => &artist.name,
            Context::Playlist(playlist) => &playlist.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOffset {
    pub uri: String,
}

/// Body of `PUT /me/player/play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub context_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PlayOffset>,
}

impl PlayRequest {
    pub fn from_start(context_uri: &str) -> Self {
        Self {
            context_uri: context_uri.to_string(),
            offset: None,
        }
    }

    pub fn at_track(context_uri: &str, track_uri: &str) -> Self {
        Self {
            context_uri: context_uri.to_string(),
            offset: Some(PlayOffset {
                uri: track_uri.to_string(),
            }),
        }
    }
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    pub played_at: String,
    pub kind: String,
    pub context: String,
    pub track: String,
    pub uri: String,
}
