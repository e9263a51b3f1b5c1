use axum::{
    extract::{multipart::{Multipart, MultipartRejection}, Path},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bytes::Bytes;
use tracing::warn;

use crate::{
    error::{bad, AppErr, AppResult, Reply},
    hub::SharedHub,
    state::UploadMeta,
    store::BlobStore,
};

pub fn router() -> Router {
    Router::new()
        .route("/upload",            post(upload_file))
        .route("/uploads/:filename", get(serve_file))
}

/* 表單裡收集到的欄位 */
#[derive(Default)]
struct UploadForm {
    file:     Option<(String, Bytes)>,  // (filename, data)
    username: Option<String>,
}

pub async fn upload_file(
    Extension(hub):   Extension<SharedHub>,
    Extension(blobs): Extension<BlobStore>,
    mp: Result<Multipart, MultipartRejection>,
) -> Json<Reply> {
    let reply = match store_upload(&hub, &blobs, mp).await {
        Ok(())                          => Reply::ok("upload succeeded"),
        Err(AppErr::Validation(msg))    => Reply::fail(msg),
        Err(e @ AppErr::Multipart(_))   => {
            warn!(error = %e, "unreadable upload form");
            Reply::fail("Failed to upload file")
        }
        Err(e) => {
            warn!(error = %e, "upload failed");
            Reply::fail(format!("Error saving file: {e}"))
        }
    };
    Json(reply)
}

async fn store_upload(
    hub:   &SharedHub,
    blobs: &BlobStore,
    mp:    Result<Multipart, MultipartRejection>,
) -> AppResult<()> {
    let Ok(mp) = mp else { return Err(bad("No file part")) };
    let form = read_form(mp).await?;

    let Some((filename, data)) = form.file else { return Err(bad("No file part")) };
    if filename.is_empty() {
        return Err(bad("No selected file"));
    }
    let Some(username) = form.username else { return Err(bad("Failed to upload file")) };

    let (stored, path) = blobs.put(&filename, &data).await?;
    hub.handle_file_uploaded(UploadMeta { filename: stored, username }, &path).await;
    Ok(())
}

/// Only a `file` part that carries a filename counts as the file; a plain
/// `file` text field is ignored. The file is held in memory because the
/// username may arrive after it and nothing is written until it is checked.
async fn read_form(mut mp: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = mp.next_field().await? {
        let part = field.name().unwrap_or_default().to_owned();
        match part.as_str() {
            "file" => {
                let Some(name) = field.file_name().map(str::to_owned) else { continue };
                form.file = Some((name, field.bytes().await?));
            }
            "username" => form.username = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

pub async fn serve_file(
    Extension(blobs): Extension<BlobStore>,
    Path(filename):   Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = blobs.get(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], data))
}
