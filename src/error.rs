use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type AppResult<T> = Result<T, AppErr>;

#[derive(thiserror::Error, Debug)]
pub enum AppErr {
    #[error("{0}")]
    Validation(String),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Multipart: {0}")]
    Multipart(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/* ── HTTP 回覆本體：{success, message} ── */
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub success: bool,
    pub message: String,
}

impl Reply {
    pub fn ok(msg: impl Into<String>)   -> Self { Self { success: true,  message: msg.into() } }
    pub fn fail(msg: impl Into<String>) -> Self { Self { success: false, message: msg.into() } }
}

/// Everything except a missing blob answers 200; callers check `success`.
impl IntoResponse for AppErr {
    fn into_response(self) -> axum::response::Response {
        let code = match self {
            AppErr::NotFound(_) => StatusCode::NOT_FOUND,
            _                   => StatusCode::OK,
        };
        (code, Json(Reply::fail(self.to_string()))).into_response()
    }
}

/* ── 小助手：把任何 error 轉成 Validation / Io ── */
pub fn bad<E: Display>(e: E) -> AppErr { AppErr::Validation(e.to_string()) }
pub fn io<E: Into<std::io::Error>>(e: E) -> AppErr {
    AppErr::Io(e.into())
}

impl From<axum::extract::multipart::MultipartError> for AppErr {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        AppErr::Multipart(e.body_text())
    }
}
