//! Document upload

use crate::{AppState, WebError};
use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::warn;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

pub fn file_routes() -> Router<AppState> {
    Router::new().route("/api/file/read", post(read_file))
}

/// Only names ending in `.xml` (any case) are accepted
fn check_xml_name(name: Option<&str>) -> Result<&str, WebError> {
    match name {
        Some(name) if name.to_ascii_lowercase().ends_with(".xml") => Ok(name),
        other => {
            warn!(file = ?other, "Rejected upload without .xml name");
            Err(WebError::BadRequest(
                "Uploaded file is not an XML file".to_string(),
            ))
        }
    }
}

async fn read_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<bool>, WebError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = check_xml_name(field.file_name())?.to_string();
        let bytes = field.bytes().await?;

        let ok = state.ingestor.ingest(&file_name, &bytes).await?;
        return Ok(Json(ok));
    }

    Err(WebError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
