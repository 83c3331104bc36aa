use chrono::{DateTime, Utc};
use sporlctx::history::{ContextHistory, ContextKind, HistoryEntry};
use sporlctx::types::{Album, Context, Playlist, Track};
use sporlctx::utils::*;

// Helper function to create a history entry for a playlist
fn playlist_entry(id: &str, name: &str, track: &str, played_at: &str) -> HistoryEntry {
    HistoryEntry {
        context_uri: format!("spotify:playlist:{}", id),
        context: Context::Playlist(Playlist {
            id: id.to_string(),
            name: name.to_string(),
            uri: format!("spotify:playlist:{}", id),
            description: None,
            owner: None,
            snapshot_id: None,
        }),
        track: create_track(track),
        played_at: parse_time(played_at),
    }
}

// Helper function to create a history entry for an album
fn album_entry(id: &str, name: &str, track: &str, played_at: &str) -> HistoryEntry {
    HistoryEntry {
        context_uri: format!("spotify:album:{}", id),
        context: Context::Album(Album {
            id: id.to_string(),
            name: name.to_string(),
            uri: format!("spotify:album:{}", id),
            release_date: None,
            artists: Vec::new(),
        }),
        track: create_track(track),
        played_at: parse_time(played_at),
    }
}

fn create_track(name: &str) -> Track {
    Track {
        id: Some(name.to_lowercase()),
        name: name.to_string(),
        uri: format!("spotify:track:{}", name.to_lowercase()),
        artists: Vec::new(),
    }
}

fn parse_time(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

fn sample_history() -> ContextHistory {
    let mut history = ContextHistory::new();
    history.merge(vec![
        playlist_entry("P1", "Morning Coffee", "Sunrise", "2024-03-01T08:00:00Z"),
        album_entry("A1", "Night Drive", "Neon Lights", "2024-03-03T22:00:00Z"),
        playlist_entry("P2", "Workout", "Coffee Break", "2024-03-02T18:00:00Z"),
    ]);
    history
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Deterministic
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // URL-safe base64 without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_value() {
    // RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_build_authorize_url() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client123",
        "http://127.0.0.1:8888/callback",
        "challenge",
        "user-read-recently-played user-modify-playback-state",
    );

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge=challenge"));
    assert!(url.contains("code_challenge_method=S256"));
    // Redirect URI and scope must be encoded
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(!url.contains("user-read-recently-played user-modify-playback-state"));
}

#[test]
fn test_build_authorize_url_invalid_base() {
    let url = build_authorize_url("not a url", "client123", "cb", "challenge", "scope");
    assert!(url.starts_with("not a url?client_id=client123"));
}

#[test]
fn test_parse_context_kind_valid_inputs() {
    assert_eq!(parse_context_kind("album").unwrap(), ContextKind::Album);
    assert_eq!(parse_context_kind("Artist").unwrap(), ContextKind::Artist);
    assert_eq!(parse_context_kind(" PLAYLIST ").unwrap(), ContextKind::Playlist);
}

#[test]
fn test_parse_context_kind_invalid_inputs() {
    let err = parse_context_kind("show").unwrap_err();
    assert!(err.contains("Invalid context kind"));
    assert!(parse_context_kind("").is_err());
}

#[test]
fn test_normalize_context_uri_keeps_spotify_uris() {
    assert_eq!(
        normalize_context_uri("  spotify:playlist:37i9dQZF1DX0XUsuxWHRQd ").unwrap(),
        "spotify:playlist:37i9dQZF1DX0XUsuxWHRQd"
    );
}

#[test]
fn test_normalize_context_uri_converts_share_links() {
    assert_eq!(
        normalize_context_uri("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy?si=abc")
            .unwrap(),
        "spotify:album:4aawyAB9vmqN3uQ7FjRGTy"
    );
    assert_eq!(
        normalize_context_uri("https://open.spotify.com/intl-de/artist/0TnOYISbd1XYRBk9myaseg")
            .unwrap(),
        "spotify:artist:0TnOYISbd1XYRBk9myaseg"
    );
}

#[test]
fn test_normalize_context_uri_rejects_unknown_input() {
    assert!(normalize_context_uri("https://open.spotify.com/track/abc").is_err());
    assert!(normalize_context_uri("https://example.com/playlist/abc").is_err());
    assert!(normalize_context_uri("not a context").is_err());
}

#[test]
fn test_history_table_rows_sorted_by_recency() {
    let rows = history_table_rows(&sample_history(), None, None, None);

    let contexts: Vec<&str> = rows.iter().map(|r| r.context.as_str()).collect();
    assert_eq!(contexts, vec!["Night Drive", "Workout", "Morning Coffee"]);
    assert_eq!(rows[0].kind, "album");
    assert_eq!(rows[0].track, "Neon Lights");
    assert_eq!(rows[0].uri, "spotify:album:A1");
}

#[test]
fn test_history_table_rows_filters() {
    let history = sample_history();

    let playlists = history_table_rows(&history, Some(ContextKind::Playlist), None, None);
    assert_eq!(playlists.len(), 2);
    assert!(playlists.iter().all(|r| r.kind == "playlist"));

    // Search matches both context and track names
    let coffee = history_table_rows(&history, None, Some("COFFEE"), None);
    let contexts: Vec<&str> = coffee.iter().map(|r| r.context.as_str()).collect();
    assert_eq!(contexts, vec!["Workout", "Morning Coffee"]);

    let limited = history_table_rows(&history, None, None, Some(1));
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].context, "Night Drive");

    assert!(history_table_rows(&history, Some(ContextKind::Artist), None, None).is_empty());
}
