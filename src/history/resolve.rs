use super::ContextHistory;
use crate::types::PlayRequest;

/// Builds the first playback command for `context_uri`.
///
/// Resumes at the last known track when the history has one for this
/// context, otherwise starts the context from its default position.
pub fn resolve_play(history: &ContextHistory, context_uri: &str) -> PlayRequest {
    match history.get_by_uri(context_uri) {
        Some(entry) => PlayRequest::at_track(context_uri, &entry.track.uri),
        None => PlayRequest::from_start(context_uri),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        history::HistoryEntry,
        types::{Album, Context, Track},
    };

    #[test]
    fn empty_history_plays_from_start() {
        let request = resolve_play(&ContextHistory::new(), "ctx:playlist:P1");
        assert_eq!(request, PlayRequest::from_start("ctx:playlist:P1"));
    }

    #[test]
    fn known_context_resumes_at_track() {
        let mut history = ContextHistory::new();
        history.merge_entry(HistoryEntry {
            context_uri: "spotify:album:A1".to_string(),
            context: Context::Album(Album {
                id: "A1".to_string(),
                name: "Album".to_string(),
                uri: "spotify:album:A1".to_string(),
                release_date: None,
                artists: Vec::new(),
            }),
            track: Track {
                id: Some("T7".to_string()),
                name: "Seven".to_string(),
                uri: "spotify:track:T7".to_string(),
                artists: Vec::new(),
            },
            played_at: "2024-03-01T12:00:00Z".parse().unwrap(),
        });

        let request = resolve_play(&history, "https://open.spotify.com/album/A1");
        assert_eq!(request.offset.unwrap().uri, "spotify:track:T7");
        assert_eq!(request.context_uri, "https://open.spotify.com/album/A1");
    }
}
