//! In-memory chat transcript with a whole-file JSON mirror.
//!
//! Memory is authoritative. The file only changes on `replace`, and a
//! failed write leaves the new in-memory contents in place.

use std::path::PathBuf;
use tokio::{fs, sync::Mutex};
use tracing::info;

use crate::{error::AppResult, state::ChatEntry};

pub struct TranscriptStore {
    entries: Mutex<Vec<ChatEntry>>,
    path:    PathBuf,
}

impl TranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { entries: Mutex::new(Vec::new()), path: path.into() }
    }

    pub async fn read(&self) -> Vec<ChatEntry> {
        self.entries.lock().await.clone()
    }

    /// Memory only; the file mirror is untouched.
    pub async fn append(&self, entry: ChatEntry) {
        self.entries.lock().await.push(entry);
    }

    /// Swap the whole transcript, then rewrite the file. The lock is held
    /// through the write so concurrent saves land on disk in order.
    pub async fn replace(&self, entries: Vec<ChatEntry>) -> AppResult<()> {
        let mut cur = self.entries.lock().await;
        *cur = entries;
        let json = serde_json::to_vec(&*cur)?;
        fs::write(&self.path, json).await?;
        info!(path = %self.path.display(), entries = cur.len(), "transcript saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppErr;

    fn entry(u: &str, m: &str) -> ChatEntry {
        ChatEntry { username: u.into(), message: m.into() }
    }

    #[tokio::test]
    async fn starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("chat_data.json"));
        assert!(store.read().await.is_empty());
        assert_eq!(store.read().await, store.read().await);
    }

    #[tokio::test]
    async fn append_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_data.json");
        let store = TranscriptStore::new(&path);

        store.append(entry("a", "hi")).await;
        store.append(entry("b", "yo")).await;

        assert_eq!(store.read().await, vec![entry("a", "hi"), entry("b", "yo")]);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn replace_overwrites_memory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_data.json");
        let store = TranscriptStore::new(&path);
        store.append(entry("old", "gone")).await;

        let next = vec![entry("x", "1"), entry("y", "")];
        store.replace(next.clone()).await.unwrap();

        assert_eq!(store.read().await, next);
        let on_disk: Vec<ChatEntry> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, next);

        store.replace(Vec::new()).await.unwrap();
        assert!(store.read().await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn failed_write_keeps_new_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("missing").join("chat_data.json"));
        store.append(entry("old", "msg")).await;

        let next = vec![entry("new", "msg")];
        let err = store.replace(next.clone()).await.unwrap_err();

        assert!(matches!(err, AppErr::Io(_)));
        assert_eq!(store.read().await, next);
    }
}
