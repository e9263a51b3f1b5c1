mod config;
mod error;
mod hub;
mod state;
mod store;
mod utils {
    pub mod filename;
}
mod routes;

use std::sync::Arc;
use tracing::info;

use crate::{
    config::Config,
    hub::Hub,
    store::{BlobStore, TranscriptStore},
};
use error::AppErr;

#[tokio::main]
async fn main() -> Result<(), AppErr> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let cfg   = Config::from_env();
    let hub   = Arc::new(Hub::new(TranscriptStore::new(&cfg.chat_file)));
    let blobs = BlobStore::new(&cfg.upload_dir);
    info!(chat_file = %cfg.chat_file.display(), uploads = %blobs.dir().display(), "stores ready");

    let app = routes::app(hub, blobs, &cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, "chat relay listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
