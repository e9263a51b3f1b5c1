use axum::{routing::{get, post}, Extension, Json, Router};
use bytes::Bytes;
use tracing::warn;

use crate::{
    error::{AppResult, Reply},
    hub::SharedHub,
    state::{ChatEntry, SaveChatReq},
};

pub fn router() -> Router {
    Router::new()
        .route("/saveChat", post(save_chat))
        .route("/getChat",  get(get_chat))
}

/// Body is parsed by hand so a bad payload still answers `{success:false}`.
async fn save_chat(Extension(hub): Extension<SharedHub>, body: Bytes) -> Json<Reply> {
    match replace_transcript(&hub, &body).await {
        Ok(())  => Json(Reply::ok("chat saved")),
        Err(e)  => {
            warn!(error = %e, "saveChat failed");
            Json(Reply::fail(format!("Error saving chat: {e}")))
        }
    }
}

async fn replace_transcript(hub: &SharedHub, body: &[u8]) -> AppResult<()> {
    let req: SaveChatReq = serde_json::from_slice(body)?;
    hub.save_transcript(req.chat).await
}

async fn get_chat(Extension(hub): Extension<SharedHub>) -> Json<Vec<ChatEntry>> {
    Json(hub.get_transcript().await)
}
