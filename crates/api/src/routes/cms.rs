//! Public read-only CMS routes under `/api/v1/cms`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::{ContentBlockQuery, PublicContentBlock, TermsOfService};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/cms/terms-of-service
///
/// The body is Markdown. A missing or blank block is restored from the
/// shipped default before responding.
pub async fn terms_of_service(
    State(state): State<AppState>,
) -> Result<Json<TermsOfService>, ApiError> {
    Ok(Json(state.content_blocks().terms_of_service().await?))
}

/// GET /api/v1/cms/blocks/:key
///
/// With `category`, a block stored under another category is not found.
pub async fn get_public_block(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ContentBlockQuery>,
) -> Result<Json<PublicContentBlock>, ApiError> {
    let category = query
        .category
        .as_deref()
        .and_then(shared::validation::trimmed_non_empty);

    state
        .content_blocks()
        .get_block_by_key(&key, category)
        .await?
        .map(|block| Json(block.into()))
        .ok_or_else(|| ApiError::NotFound("Content block not found".to_string()))
}
