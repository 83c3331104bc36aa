use crate::{
    error,
    history::{ContextHistoryTracker, PlayOutcome},
    info,
    management::HistoryManager,
    spotify::SpotifyApi,
    success, utils, warning,
};

/// Plays `context`, resuming at its last played track when known.
///
/// With `refresh` the history is updated (and persisted) first so plays from
/// the last few minutes are taken into account. A failed refresh keeps what
/// was merged before the failure and plays from that history.
pub async fn play(context: String, refresh: bool) {
    let context_uri = match utils::normalize_context_uri(&context) {
        Ok(uri) => uri,
        Err(e) => error!("{}", e),
    };

    let mut history_mgr = match HistoryManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => error!("Failed to load context history. Err: {}", e),
    };

    let api = match SpotifyApi::from_cache().await {
        Ok(api) => api,
        Err(e) => error!("{}", e),
    };

    let tracker = ContextHistoryTracker::with_state(
        api,
        history_mgr.history().clone(),
        history_mgr.cursor().cloned(),
    );

    if refresh {
        info!("Updating context history...");
        if let Err(e) = tracker.update().await {
            warning!("Cannot update context history, using the stored one. Err: {}", e);
        }
        if let Err(e) = history_mgr.save_tracker(&tracker).await {
            warning!("Failed to save context history. Err: {}", e);
        }
    }

    match tracker.play(&context_uri).await {
        Ok(PlayOutcome::Resumed { track_uri }) => {
            success!("Resumed {} at {}", context_uri, track_uri)
        }
        Ok(PlayOutcome::FromStart) => success!("Playing {} from the start", context_uri),
        Err(e) => error!("{}", e),
    }
}
