//! # Context History Module
//!
//! Keeps, for every album, artist and playlist a user played something in,
//! the most recently played track of that context.
//!
//! ## Pipeline
//!
//! ```text
//! ContextHistoryTracker::update
//!     ├── PlaybackApi::recently_played   (one page, cursor as lower bound)
//!     ├── classify                       (album / artist / playlist buckets)
//!     ├── Enricher::enrich               (bulk or per-id lookups, concurrent)
//!     └── ContextHistory::merge          (newest play per ContextId wins)
//! ```
//!
//! Pages are pulled one after another until the source stops reporting a
//! cursor. Each page is merged as a whole under one write lock.
//!
//! ## Failure model
//!
//! Soft failures (unknown context kind, a playlist that cannot be fetched, a
//! failed bulk lookup, a failed resume) are reported with [`crate::warning!`]
//! and never abort a cycle. A failed page fetch or a failed fallback playback
//! is returned as a [`HistoryError`]. Pages merged before the failure stay
//! merged.

mod api;
mod classify;
mod enrich;
mod merge;
mod resolve;
mod tracker;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use api::PlaybackApi;
pub use classify::{ContextKind, ContextPlay, classify};
pub use enrich::{Enricher, KindHandler, LookupStrategy};
pub use merge::{ContextHistory, HistoryEntry};
pub use resolve::resolve_play;
pub use tracker::{ContextHistoryTracker, PlayOutcome, RECENTLY_PLAYED_LIMIT, UpdateReport};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical identity of a context: the last segment of its URI.
///
/// `spotify:playlist:37i9dQZF1DX0XUsuxWHRQd`,
/// `https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd?si=abc` and
/// `37i9dQZF1DX0XUsuxWHRQd` all map to the same id. A query or fragment is
/// not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(String);

impl ContextId {
    pub fn from_uri(uri: &str) -> Self {
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        let segment = path.rsplit([':', '/']).next().unwrap_or(path);
        ContextId(segment.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque pagination boundary reported by the history source.
///
/// For Spotify this is a unix timestamp in milliseconds. Only the source
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Cursor(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Cursor(value.to_string())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(
        "failed to fetch recently played tracks after cursor {}: {}",
        .after.as_ref().map_or("<none>", Cursor::as_str),
        .source
    )]
    PageFetch {
        after: Option<Cursor>,
        #[source]
        source: BoxError,
    },

    #[error("failed to start playback of {context_uri}: {source}")]
    Playback {
        context_uri: String,
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_id_takes_last_segment() {
        assert_eq!(
            ContextId::from_uri("spotify:album:4aawyAB9vmqN3uQ7FjRGTy").as_str(),
            "4aawyAB9vmqN3uQ7FjRGTy"
        );
        assert_eq!(ContextId::from_uri("spotify:user:bob:playlist:P1").as_str(), "P1");
        assert_eq!(ContextId::from_uri("P1").as_str(), "P1");
    }

    #[test]
    fn context_id_ignores_query_and_url_form() {
        assert_eq!(ContextId::from_uri("x:y:ABC?v=2"), ContextId::from_uri("x:y:ABC"));
        assert_eq!(
            ContextId::from_uri("https://open.spotify.com/playlist/ABC?si=a:b"),
            ContextId::from_uri("spotify:playlist:ABC")
        );
    }
}
