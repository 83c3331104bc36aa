use tokio::sync::{Mutex, RwLock};

use super::{
    ContextHistory, Cursor, Enricher, HistoryEntry, HistoryError, PlaybackApi, classify,
    resolve_play,
};
use crate::{
    types::{PlayHistoryItem, PlayRequest},
    warning,
};

/// Spotify returns at most 50 plays per request.
pub const RECENTLY_PLAYED_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Pages fetched during the cycle.
    pub pages: usize,
    /// History entries inserted or replaced.
    pub merged: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Resumed { track_uri: String },
    FromStart,
}

/// Owns the context history and the pagination cursor of one user.
///
/// `update` cycles are serialized. Readers calling [`history`](Self::history)
/// during a cycle see the state before or after a page, never half of one.
pub struct ContextHistoryTracker<A> {
    api: A,
    enricher: Enricher,
    page_size: u32,
    history: RwLock<ContextHistory>,
    cursor: Mutex<Option<Cursor>>,
    cycle: Mutex<()>,
}

impl<A: PlaybackApi> ContextHistoryTracker<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, ContextHistory::new(), None)
    }

    /// Continues from a previously persisted history and cursor.
    pub fn with_state(api: A, history: ContextHistory, cursor: Option<Cursor>) -> Self {
        Self {
            api,
            enricher: Enricher::default(),
            page_size: RECENTLY_PLAYED_LIMIT,
            history: RwLock::new(history),
            cursor: Mutex::new(cursor),
            cycle: Mutex::new(()),
        }
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, RECENTLY_PLAYED_LIMIT);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn history(&self) -> ContextHistory {
        self.history.read().await.clone()
    }

    pub async fn cursor(&self) -> Option<Cursor> {
        self.cursor.lock().await.clone()
    }

    /// Pulls every play newer than the stored cursor into the history.
    pub async fn update(&self) -> Result<UpdateReport, HistoryError> {
        let _cycle = self.cycle.lock().await;
        let start = self.cursor().await;
        self.run_cycle(start).await
    }

    /// Like [`update`](Self::update), but the first page starts after `after`
    /// instead of the stored cursor.
    pub async fn update_from(&self, after: Cursor) -> Result<UpdateReport, HistoryError> {
        let _cycle = self.cycle.lock().await;
        self.run_cycle(Some(after)).await
    }

    pub async fn updated_history(&self) -> Result<ContextHistory, HistoryError> {
        self.update().await?;
        Ok(self.history().await)
    }

    /// Plays `context_uri`, resuming at the last known track if there is one.
    ///
    /// A failed resume falls back to playing the context from the start. Only
    /// a failure of that fallback is returned.
    pub async fn play(&self, context_uri: &str) -> Result<PlayOutcome, HistoryError> {
        let request = resolve_play(&*self.history.read().await, context_uri);

        if let Some(offset) = &request.offset {
            match self.api.play(&request).await {
                Ok(()) => {
                    return Ok(PlayOutcome::Resumed {
                        track_uri: offset.uri.clone(),
                    });
                }
                Err(e) => warning!(
                    "Could not resume {} at {}, playing from the start: {}",
                    context_uri,
                    offset.uri,
                    e
                ),
            }
        }

        self.api
            .play(&PlayRequest::from_start(context_uri))
            .await
            .map_err(|source| HistoryError::Playback {
                context_uri: context_uri.to_string(),
                source,
            })?;

        Ok(PlayOutcome::FromStart)
    }

    async fn run_cycle(&self, start: Option<Cursor>) -> Result<UpdateReport, HistoryError> {
        let mut report = UpdateReport::default();
        let mut after = start;

        loop {
            let page = self
                .api
                .recently_played(after.as_ref(), self.page_size)
                .await
                .map_err(|source| HistoryError::PageFetch {
                    after: after.clone(),
                    source,
                })?;
            report.pages += 1;

            let next = page.next_cursor().map(Cursor::from);
            let entries = self.process_page(page.items.unwrap_or_default()).await;

            report.merged += self.history.write().await.merge(entries);

            let Some(next) = next else {
                break;
            };
            *self.cursor.lock().await = Some(next.clone());

            if after.as_ref() == Some(&next) {
                warning!("Recently played cursor did not advance past {}, stopping", next);
                break;
            }
            after = Some(next);
        }

        Ok(report)
    }

    async fn process_page(&self, items: Vec<PlayHistoryItem>) -> Vec<HistoryEntry> {
        let buckets = classify(items, &self.enricher.kinds());
        let contexts = self.enricher.enrich(&self.api, &buckets).await;

        buckets
            .into_iter()
            .zip(contexts)
            .flat_map(|(plays, contexts)| {
                plays
                    .into_iter()
                    .zip(contexts)
                    .filter_map(|(play, context)| context.map(|c| play.into_entry(c)))
            })
            .collect()
    }
}
