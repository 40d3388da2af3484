//! Tag queries

use crate::{AppState, TagAttributesResponse, TagCountResponse, WebError};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tags/get-count", get(get_tag_count))
        .route("/api/tags/attributes/get", get(get_tag_attributes))
}

#[derive(Debug, Deserialize)]
struct TagQuery {
    file_name: String,
    tag_name: String,
}

async fn get_tag_count(
    State(state): State<AppState>,
    query: Result<Query<TagQuery>, QueryRejection>,
) -> Result<Json<TagCountResponse>, WebError> {
    let Query(query) = query?;
    let count = state
        .queries
        .count_tags(&query.file_name, &query.tag_name)
        .await?;

    Ok(Json(TagCountResponse { count }))
}

async fn get_tag_attributes(
    State(state): State<AppState>,
    query: Result<Query<TagQuery>, QueryRejection>,
) -> Result<Json<TagAttributesResponse>, WebError> {
    let Query(query) = query?;
    let names = state
        .queries
        .list_attribute_names(&query.file_name, &query.tag_name)
        .await?;

    Ok(Json(TagAttributesResponse {
        attributes: names.into_iter().collect(),
    }))
}
