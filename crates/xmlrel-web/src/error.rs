use axum::extract::multipart::MultipartError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use xmlrel_core::XmlError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),

    #[error("{}", .0.body_text())]
    Upload(#[from] MultipartError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WebError>;

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Xml(err) => match err {
                XmlError::DuplicateFile(_)
                | XmlError::MalformedInput(_)
                | XmlError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
                XmlError::FileNotFound(_) | XmlError::TagNotFound { .. } => StatusCode::NOT_FOUND,
                XmlError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // 413 when the body limit is hit mid-stream
            WebError::Query(rejection) => rejection.status(),
            WebError::Upload(err) => err.status(),
            WebError::Config(_) | WebError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        // Storage details stay in the log
        let detail = match &self {
            WebError::Xml(XmlError::Storage(_)) => "Internal storage error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
