use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContextId, ContextKind};
use crate::types::{Context, Track};

/// The last track played inside one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// URI of the context as reported with the play event.
    pub context_uri: String,
    pub context: Context,
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn id(&self) -> ContextId {
        ContextId::from_uri(&self.context_uri)
    }

    pub fn kind(&self) -> ContextKind {
        ContextKind::of(&self.context)
    }
}

/// Most recent play per context, keyed by [`ContextId`].
///
/// Serialized as a plain list of entries. Loading a list merges it, so a file
/// containing two spellings of the same context yields a single entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct ContextHistory {
    entries: HashMap<ContextId, HistoryEntry>,
}

impl ContextHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &ContextId) -> Option<&HistoryEntry> {
        self.entries.get(id)
    }

    pub fn get_by_uri(&self, context_uri: &str) -> Option<&HistoryEntry> {
        self.get(&ContextId::from_uri(context_uri))
    }

    /// Entries ordered from the most to the least recently played.
    pub fn by_recency(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.played_at
                .cmp(&a.played_at)
                .then_with(|| a.context_uri.cmp(&b.context_uri))
        });
        entries
    }

    /// Merges `entries` and returns how many were inserted or replaced.
    pub fn merge<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = HistoryEntry>,
    {
        let mut changed = 0;
        for entry in entries {
            if self.merge_entry(entry) {
                changed += 1;
            }
        }
        changed
    }

    /// Inserts `entry` unless a play of the same context at the same time or
    /// later is already known. Returns whether the history changed.
    pub fn merge_entry(&mut self, entry: HistoryEntry) -> bool {
        let id = entry.id();
        match self.entries.get(&id) {
            Some(current) if current.played_at >= entry.played_at => false,
            _ => {
                self.entries.insert(id, entry);
                true
            }
        }
    }
}

impl From<Vec<HistoryEntry>> for ContextHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = ContextHistory::new();
        history.merge(entries);
        history
    }
}

impl From<ContextHistory> for Vec<HistoryEntry> {
    fn from(history: ContextHistory) -> Self {
        let mut entries: Vec<HistoryEntry> = history.entries.into_values().collect();
        entries.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        entries
    }
}
