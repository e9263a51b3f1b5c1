use serde::{Deserialize, Serialize};

/* ------------ 聊天紀錄 ------------ */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub username: String,
    pub message:  String,
}

/* ------------ 上傳通知（不進紀錄） ------------ */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadNotice {
    pub filename:  String,
    pub username:  String,
    pub file_type: String,
}

/// Who uploaded what, as the gateway saw it before storage.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub filename: String,
    pub username: String,
}

/// Inbound chat payload. Keys are only checked for presence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message:  Option<String>,
}

/* ------------ WebSocket 封包：{"event":..., "data":...} ------------ */
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    ChatMessage(ChatInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    ChatMessage(ChatEntry),
    FileUploaded(UploadNotice),
}

#[derive(Debug, Deserialize)]
pub struct SaveChatReq {
    pub chat: Vec<ChatEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_events_use_event_envelope() {
        let ev = ServerEvent::FileUploaded(UploadNotice {
            filename:  "a.png".into(),
            username:  "bob".into(),
            file_type: ".png".into(),
        });
        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({"event": "file_uploaded",
                   "data": {"filename": "a.png", "username": "bob", "file_type": ".png"}})
        );
    }

    #[test]
    fn chat_input_tolerates_missing_keys() {
        let raw = r#"{"event":"chat_message","data":{"username":"a"}}"#;
        let ClientEvent::ChatMessage(input) = serde_json::from_str(raw).unwrap();
        assert_eq!(input.username.as_deref(), Some("a"));
        assert!(input.message.is_none());
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(serde_json::from_str::<ClientEvent>(r#"{"event":"typing","data":{}}"#).is_err());
    }
}
