//! Broadcast hub: the session registry plus the shared transcript.
//!
//! Every chat-affecting event goes through here. A broadcast holds the
//! registry lock while it pushes into each session's own unbounded queue,
//! so membership is frozen for the whole fan-out and nothing awaits a
//! socket. Chat lines are appended under that same lock, which keeps
//! fan-out order equal to transcript order.

use std::{collections::HashMap, path::Path, sync::Arc};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::AppResult,
    state::{ChatEntry, ChatInput, ServerEvent, UploadMeta, UploadNotice},
    store::TranscriptStore,
    utils::filename::file_type,
};

pub type SessionId = Uuid;
pub type Outbound  = Arc<ServerEvent>;
pub type SharedHub = Arc<Hub>;

/// Receiving half handed to the gateway for one connection.
pub struct Session {
    pub id: SessionId,
    pub rx: mpsc::UnboundedReceiver<Outbound>,
}

pub struct Hub {
    transcript: TranscriptStore,
    sessions:   Mutex<HashMap<SessionId, mpsc::UnboundedSender<Outbound>>>,
}

impl Hub {
    pub fn new(transcript: TranscriptStore) -> Self {
        Self { transcript, sessions: Mutex::new(HashMap::new()) }
    }

    /* ------------ 連線管理 ------------ */
    pub async fn join(&self) -> Session {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        let mut m = self.sessions.lock().await;
        m.insert(id, tx);
        info!(%id, online = m.len(), "session joined");
        Session { id, rx }
    }

    pub async fn leave(&self, id: SessionId) {
        let mut m = self.sessions.lock().await;
        if m.remove(&id).is_some() {
            info!(%id, online = m.len(), "session left");
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /* ------------ 事件 ------------ */

    /// Append and fan out a chat line. Input missing either key is
    /// dropped without a trace; empty strings are fine.
    pub async fn handle_chat_message(&self, input: ChatInput) -> Option<ChatEntry> {
        let (Some(username), Some(message)) = (input.username, input.message) else {
            debug!("dropping chat_message without username/message");
            return None;
        };
        let entry = ChatEntry { username, message };
        let m = self.sessions.lock().await;
        self.transcript.append(entry.clone()).await;
        fan_out(&m, ServerEvent::ChatMessage(entry.clone()));
        Some(entry)
    }

    /// Announce a stored blob. Nothing goes into the transcript.
    pub async fn handle_file_uploaded(&self, meta: UploadMeta, blob_path: &Path) -> UploadNotice {
        let stored = blob_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let notice = UploadNotice {
            filename:  meta.filename,
            username:  meta.username,
            file_type: file_type(&stored),
        };
        self.broadcast(ServerEvent::FileUploaded(notice.clone())).await;
        notice
    }

    pub async fn get_transcript(&self) -> Vec<ChatEntry> {
        self.transcript.read().await
    }

    pub async fn save_transcript(&self, entries: Vec<ChatEntry>) -> AppResult<()> {
        self.transcript.replace(entries).await
    }

    async fn broadcast(&self, ev: ServerEvent) {
        fan_out(&*self.sessions.lock().await, ev);
    }
}

fn fan_out(sessions: &HashMap<SessionId, mpsc::UnboundedSender<Outbound>>, ev: ServerEvent) {
    let ev = Arc::new(ev);
    for (id, tx) in sessions {
        if tx.send(ev.clone()).is_err() {
            debug!(%id, "session gone before broadcast");
        }
    }
}
