use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    history::{ContextHistoryTracker, Cursor},
    info,
    management::HistoryManager,
    spotify::SpotifyApi,
    success, warning,
};

/// Merges every play since the last run into the stored history.
///
/// With `after` the first page starts at that cursor (unix milliseconds)
/// instead of the stored one. Whatever was merged before a failure is still
/// persisted.
pub async fn update(after: Option<String>) {
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

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching recently played tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = match after {
        Some(after) => tracker.update_from(Cursor::new(after)).await,
        None => tracker.update().await,
    };
    pb.finish_and_clear();

    if let Err(e) = history_mgr.save_tracker(&tracker).await {
        error!(
            "Failed to save context history to {}. Err: {}",
            history_mgr.path().display(),
            e
        );
    }

    let total = history_mgr.history().len();
    match result {
        Ok(report) if report.merged == 0 => {
            info!("No new contexts played ({} known).", total);
        }
        Ok(report) => success!(
            "Updated {} contexts from {} pages ({} known).",
            report.merged,
            report.pages,
            total
        ),
        Err(e) => {
            warning!("Stored what was fetched before the failure.");
            error!("Cannot update context history. Err: {}", e);
        }
    }
}
