//! Configuration management for the Spotify Context History CLI.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the local data directory. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! | Variable                     | Default                                                 |
//! |------------------------------|---------------------------------------------------------|
//! | `SPOTIFY_API_URL`            | `https://api.spotify.com/v1`                            |
//! | `SPOTIFY_API_AUTH_URL`       | `https://accounts.spotify.com/authorize`                |
//! | `SPOTIFY_API_TOKEN_URL`      | `https://accounts.spotify.com/api/token`                |
//! | `SPOTIFY_API_AUTH_SCOPE`     | `user-read-recently-played user-modify-playback-state` |
//! | `SPOTIFY_API_AUTH_CLIENT_ID` | required                                                |
//! | `SPOTIFY_API_REDIRECT_URI`   | required                                                |
//! | `SERVER_ADDRESS`             | required for `sporlctx auth`                            |

use std::{env, path::PathBuf};

pub const APP_DIR: &str = "sporlctx";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str = "user-read-recently-played user-modify-playback-state";

/// Returns the application's directory inside the platform-specific local
/// data directory.
///
/// - Linux: `~/.local/share/sporlctx`
/// - macOS: `~/Library/Application Support/sporlctx`
/// - Windows: `%LOCALAPPDATA%/sporlctx`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// not an error since every value can also come from the environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the `.env` file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{} must be set", key))
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String, String> {
    required("SERVER_ADDRESS")
}

/// Client ID of the application registered on Spotify's developer platform.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Callback URL Spotify redirects to after authorization.
///
/// Must match the redirect URI registered for the application, e.g.
/// `http://127.0.0.1:8080/callback`.
pub fn spotify_redirect_uri() -> Result<String, String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Space separated scopes requested during authorization.
///
/// Reading the history needs `user-read-recently-played`, resuming playback
/// needs `user-modify-playback-state`.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    with_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
