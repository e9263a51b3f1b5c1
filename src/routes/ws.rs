use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, Extension},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tracing::debug;

use crate::{hub::{Session, SharedHub}, state::ClientEvent};

pub fn router() -> Router {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(hub): Extension<SharedHub>,
) -> impl IntoResponse {
    let online = hub.session_count().await;
    debug!(online, "ws upgrade");
    ws.on_upgrade(move |s| user_ws(s, hub))
}

async fn user_ws(sock: WebSocket, hub: SharedHub) {
    let (sink, stream) = sock.split();
    run_session(hub, stream, sink).await;
}

/* ---------------- per session ---------------- */
async fn run_session<St, Si, E>(hub: SharedHub, mut stream: St, mut sink: Si)
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    Si: Sink<Message> + Unpin + Send + 'static,
{
    let Session { id, mut rx } = hub.join().await;

    /* 寫出：hub 佇列 → socket */
    let mut writer = tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&*ev) else { continue };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    /* 讀入：socket → hub */
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(raw))) => dispatch(&hub, &raw).await,
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            _ = &mut writer => break,
        }
    }

    hub.leave(id).await;
    writer.abort();
}

/// Unparseable frames and unknown events are dropped like malformed chat.
async fn dispatch(hub: &SharedHub, raw: &str) {
    match serde_json::from_str::<ClientEvent>(raw) {
        Ok(ClientEvent::ChatMessage(input)) => {
            hub.handle_chat_message(input).await;
        }
        Err(e) => debug!(error = %e, "dropping unreadable frame"),
    }
}
