use std::{io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    config,
    history::{ContextHistory, ContextHistoryTracker, Cursor, PlaybackApi},
};

/// Everything that survives between two runs of `sporlctx update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    #[serde(default)]
    pub cursor: Option<Cursor>,
    #[serde(default)]
    pub history: ContextHistory,
}

pub struct HistoryManager {
    path: PathBuf,
    snapshot: HistorySnapshot,
}

impl HistoryManager {
    pub fn new(path: PathBuf, snapshot: Option<HistorySnapshot>) -> Self {
        Self {
            path,
            snapshot: snapshot.unwrap_or_default(),
        }
    }

    /// Loads the snapshot from the default cache location.
    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::cache_path()).await
    }

    /// Loads the snapshot stored at `path`. A missing file is an empty
    /// history, not an error.
    pub async fn load_from(path: PathBuf) -> Result<Self, String> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new(path, None)),
            Err(e) => return Err(e.to_string()),
        };

        let snapshot: HistorySnapshot =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(path, Some(snapshot)))
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.snapshot).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn history(&self) -> &ContextHistory {
        &self.snapshot.history
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.snapshot.cursor.as_ref()
    }

    pub fn replace(&mut self, history: ContextHistory, cursor: Option<Cursor>) -> &mut Self {
        self.snapshot = HistorySnapshot { cursor, history };
        self
    }

    /// Takes over the tracker's current history and cursor and persists them.
    ///
    /// Works after a failed update too: the tracker still holds every page
    /// merged before the failure.
    pub async fn save_tracker<A: PlaybackApi>(
        &mut self,
        tracker: &ContextHistoryTracker<A>,
    ) -> Result<(), String> {
        self.replace(tracker.history().await, tracker.cursor().await);
        self.persist().await
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn cache_path() -> PathBuf {
        config::data_dir().join("cache/context-history.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        history::HistoryEntry,
        types::{Artist, Context, Track},
    };

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sporlctx-test-{}", std::process::id()))
            .join(name)
    }

    fn entry() -> HistoryEntry {
        HistoryEntry {
            context_uri: "spotify:artist:R1".to_string(),
            context: Context::Artist(Artist {
                id: "R1".to_string(),
                name: "Artist".to_string(),
                uri: "spotify:artist:R1".to_string(),
                genres: Vec::new(),
            }),
            track: Track {
                id: Some("T1".to_string()),
                name: "Track".to_string(),
                uri: "spotify:track:T1".to_string(),
                artists: Vec::new(),
            },
            played_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let manager = HistoryManager::load_from(temp_path("missing.json"))
            .await
            .unwrap();

        assert!(manager.history().is_empty());
        assert!(manager.cursor().is_none());
    }

    #[tokio::test]
    async fn persisted_snapshot_loads_back() {
        let path = temp_path("roundtrip/context-history.json");
        let mut history = ContextHistory::new();
        history.merge(vec![entry()]);

        let mut manager = HistoryManager::new(path.clone(), None);
        manager.replace(history.clone(), Some(Cursor::from("1700000000000")));
        manager.persist().await.unwrap();

        let loaded = HistoryManager::load_from(path).await.unwrap();
        assert_eq!(loaded.history(), &history);
        assert_eq!(loaded.cursor(), Some(&Cursor::from("1700000000000")));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        async_fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        async_fs::write(&path, "{ not json").await.unwrap();

        assert!(HistoryManager::load_from(path).await.is_err());
    }
}
