use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Local, Utc};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::{
    history::{ContextHistory, ContextKind},
    types::HistoryTableRow,
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// Falls back to plain string formatting when `auth_url` is not a valid base
/// URL, so the user still sees something to paste into a browser.
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri),
        ("code_challenge", code_challenge),
        ("code_challenge_method", "S256"),
        ("scope", scope),
    ];

    match Url::parse_with_params(auth_url, &params) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}?{}",
            auth_url,
            params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        ),
    }
}

pub fn parse_context_kind(s: &str) -> Result<ContextKind, String> {
    s.parse()
}

/// Turns user input into a Spotify context URI.
///
/// Accepts `spotify:<kind>:<id>` URIs as they are and converts
/// `https://open.spotify.com/[intl-xx/]<kind>/<id>?si=...` share links.
pub fn normalize_context_uri(input: &str) -> Result<String, String> {
    let trimmed = input.trim();

    if trimmed.starts_with("spotify:") {
        return Ok(trimmed.to_string());
    }

    if let Some((_, path)) = trimmed.split_once("open.spotify.com/") {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty() && !s.starts_with("intl-"))
            .collect();

        if let [kind, id] = segments.as_slice() {
            let kind = parse_context_kind(kind)?;
            return Ok(format!("spotify:{}:{}", kind, id));
        }
    }

    Err(format!("Could not extract a context from: {}", input))
}

pub fn format_played_at(played_at: &DateTime<Utc>) -> String {
    played_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Table rows for `sporlctx history`, most recent first.
///
/// `search` matches context or track names case-insensitively.
pub fn history_table_rows(
    history: &ContextHistory,
    kind: Option<ContextKind>,
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<HistoryTableRow> {
    let search = search.map(str::to_lowercase);

    history
        .by_recency()
        .into_iter()
        .filter(|entry| kind.is_none_or(|k| entry.kind() == k))
        .filter(|entry| {
            search.as_deref().is_none_or(|term| {
                entry.context.name().to_lowercase().contains(term)
                    || entry.track.name.to_lowercase().contains(term)
            })
        })
        .take(limit.unwrap_or(usize::MAX))
        .map(|entry| HistoryTableRow {
            played_at: format_played_at(&entry.played_at),
            kind: entry.kind().to_string(),
            context: entry.context.name().to_string(),
            track: entry.track.name.clone(),
            uri: entry.context_uri.clone(),
        })
        .collect()
}
