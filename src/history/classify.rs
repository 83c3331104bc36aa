use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContextId, HistoryEntry};
use crate::{
    types::{Context, PlayHistoryItem, Track},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Album,
    Artist,
    Playlist,
}

impl ContextKind {
    pub const ALL: [ContextKind; 3] = [
        ContextKind::Album,
        ContextKind::Artist,
        ContextKind::Playlist,
    ];

    /// Prefix looked for inside the `type` reported by Spotify.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Album => "album",
            ContextKind::Artist => "artist",
            ContextKind::Playlist => "playlist",
        }
    }

    pub fn of(context: &Context) -> Self {
        match context {
            Context::Album(_) => ContextKind::Album,
            Context::Artist(_) => ContextKind::Artist,
            Context::Playlist(_) => ContextKind::Playlist,
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ContextKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Invalid context kind: {}", s))
    }
}

/// A play event that passed classification and therefore has a context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextPlay {
    pub id: ContextId,
    pub context_uri: String,
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

impl ContextPlay {
    pub fn into_entry(self, context: Context) -> HistoryEntry {
        HistoryEntry {
            context_uri: self.context_uri,
            context,
            track: self.track,
            played_at: self.played_at,
        }
    }
}

/// Splits play events into one bucket per entry of `known_kinds`.
///
/// An event goes to the first kind whose name is contained in the reported
/// context type, so `playlist_v2` lands in the `playlist` bucket. Events
/// without a context or without a type are dropped silently, events with an
/// unknown type are dropped with a warning. Input order is kept inside each
/// bucket.
pub fn classify(items: Vec<PlayHistoryItem>, known_kinds: &[ContextKind]) -> Vec<Vec<ContextPlay>> {
    let mut buckets: Vec<Vec<ContextPlay>> = known_kinds.iter().map(|_| Vec::new()).collect();

    for item in items {
        // https://github.com/spotify/web-api/issues/966
        let Some(context) = item.context else {
            continue;
        };
        let Some(kind) = context.kind.as_deref() else {
            continue;
        };

        match known_kinds.iter().position(|known| kind.contains(known.as_str())) {
            Some(idx) => buckets[idx].push(ContextPlay {
                id: ContextId::from_uri(&context.uri),
                context_uri: context.uri,
                track: item.track,
                played_at: item.played_at,
            }),
            None => warning!("Unrecognised context type: {}", kind),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayContext;

    fn item(uri: Option<&str>, kind: Option<&str>, track: &str) -> PlayHistoryItem {
        PlayHistoryItem {
            track: Track {
                id: Some(track.to_string()),
                name: track.to_string(),
                uri: format!("spotify:track:{}", track),
                artists: Vec::new(),
            },
            played_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            context: uri.map(|uri| PlayContext {
                uri: uri.to_string(),
                kind: kind.map(str::to_string),
            }),
        }
    }

    #[test]
    fn versioned_kind_matches_by_substring() {
        let buckets = classify(
            vec![item(Some("spotify:playlist:P1"), Some("playlist_v2"), "T1")],
            &ContextKind::ALL,
        );

        assert!(buckets[0].is_empty());
        assert!(buckets[1].is_empty());
        assert_eq!(buckets[2].len(), 1);
        assert_eq!(buckets[2][0].id.as_str(), "P1");
    }

    #[test]
    fn drops_missing_and_unknown_contexts() {
        let buckets = classify(
            vec![
                item(None, None, "T1"),
                item(Some("spotify:album:A1"), None, "T2"),
                item(Some("spotify:show:S1"), Some("show"), "T3"),
                item(Some("spotify:album:A1"), Some("album"), "T4"),
            ],
            &ContextKind::ALL,
        );

        let total: usize = buckets.iter().map(Vec::len).sum();
        assert_eq!(total, 1);
        assert_eq!(buckets[0][0].track.name, "T4");
    }

    #[test]
    fn keeps_input_order_and_honours_kind_order() {
        let buckets = classify(
            vec![
                item(Some("spotify:artist:B"), Some("artist"), "T1"),
                item(Some("spotify:album:A"), Some("album"), "T2"),
                item(Some("spotify:artist:C"), Some("artist"), "T3"),
            ],
            &[ContextKind::Artist, ContextKind::Album],
        );

        let artists: Vec<&str> = buckets[0].iter().map(|p| p.track.name.as_str()).collect();
        assert_eq!(artists, vec!["T1", "T3"]);
        assert_eq!(buckets[1].len(), 1);
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("Playlist".parse::<ContextKind>(), Ok(ContextKind::Playlist));
        assert!("show".parse::<ContextKind>().is_err());
    }
}
