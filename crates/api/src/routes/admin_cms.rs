//! Admin CMS routes.
//!
//! CRUD and default seeding for content blocks, email templates and
//! notification templates, mounted under `/api/v1/admin/cms`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{
    ContentBlock, ContentBlockQuery, CreateContentBlockRequest, CreateEmailTemplateRequest,
    CreateNotificationTemplateRequest, EmailTemplate, EmailTemplateSearchQuery,
    NotificationTemplate, NotificationTemplateFilter, TemplateType, UpdateContentBlockRequest,
    UpdateEmailTemplateRequest, UpdateNotificationTemplateRequest,
};
use domain::services::{supported_variables, SeedReport, Seeded};
use domain::DomainError;
use serde::Deserialize;
use shared::pagination::MAX_LIMIT;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::run_seeding;

const TOTAL_COUNT_HEADER: &str = "x-total-count";

// Content blocks

/// GET /api/v1/admin/cms/blocks
pub async fn list_blocks(
    State(state): State<AppState>,
    Query(query): Query<ContentBlockQuery>,
) -> Result<Json<Vec<ContentBlock>>, ApiError> {
    let blocks = state
        .content_blocks()
        .list_blocks(query.category.as_deref())
        .await?;
    Ok(Json(blocks))
}

/// GET /api/v1/admin/cms/blocks/:id
pub async fn get_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentBlock>, ApiError> {
    Ok(Json(state.content_blocks().get_block(id).await?))
}

/// POST /api/v1/admin/cms/blocks
pub async fn create_block(
    State(state): State<AppState>,
    Json(request): Json<CreateContentBlockRequest>,
) -> Result<(StatusCode, Json<ContentBlock>), ApiError> {
    request.validate()?;
    let block = state.content_blocks().create_block(request).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// PUT /api/v1/admin/cms/blocks/:id
pub async fn update_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContentBlockRequest>,
) -> Result<Json<ContentBlock>, ApiError> {
    request.validate()?;
    Ok(Json(state.content_blocks().update_block(id, request).await?))
}

/// DELETE /api/v1/admin/cms/blocks/:id
pub async fn delete_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.content_blocks().delete_block(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/cms/blocks/import-missing
///
/// Creates the default blocks that do not exist yet. Existing blocks are untouched.
pub async fn import_missing_blocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentBlock>>, ApiError> {
    let created = state.content_blocks().import_missing_defaults().await?;
    info!(created = created.len(), "Imported missing content blocks");
    Ok(Json(created))
}

/// POST /api/v1/admin/cms/blocks/ensure-defaults
///
/// Overwrites every default block with its shipped content.
pub async fn ensure_default_blocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Seeded<ContentBlock>>>, ApiError> {
    let seeded = state
        .content_blocks()
        .ensure_all_defaults()
        .await
        .map_err(DomainError::from)?;
    Ok(Json(seeded))
}

/// POST /api/v1/admin/cms/blocks/load-terms-default
pub async fn load_terms_default(
    State(state): State<AppState>,
) -> Result<Json<ContentBlock>, ApiError> {
    Ok(Json(state.content_blocks().ensure_terms_default().await?))
}

// Email templates

/// GET /api/v1/admin/cms/email-templates
///
/// `skip` defaults to 0, `limit` to 100 and must lie in `1..=1000`. The total
/// match count is returned in `X-Total-Count`.
pub async fn list_email_templates(
    State(state): State<AppState>,
    Query(query): Query<EmailTemplateSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(limit) = query.limit {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(ApiError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
    }

    let (skip, limit) = query.page();
    let (items, total) = state
        .email_templates()
        .search_templates(skip, limit, query.term())
        .await?;

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(items)))
}

/// GET /api/v1/admin/cms/email-templates/:id
pub async fn get_email_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmailTemplate>, ApiError> {
    Ok(Json(state.email_templates().get_template(id).await?))
}

/// POST /api/v1/admin/cms/email-templates
pub async fn create_email_template(
    State(state): State<AppState>,
    Json(request): Json<CreateEmailTemplateRequest>,
) -> Result<(StatusCode, Json<EmailTemplate>), ApiError> {
    request.validate()?;
    let template = state.email_templates().create_template(request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/admin/cms/email-templates/:id
pub async fn update_email_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmailTemplateRequest>,
) -> Result<Json<EmailTemplate>, ApiError> {
    request.validate()?;
    Ok(Json(state.email_templates().update_template(id, request).await?))
}

/// DELETE /api/v1/admin/cms/email-templates/:id
pub async fn delete_email_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.email_templates().delete_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/cms/email-templates/load-defaults
///
/// Restores the invitation template only.
pub async fn load_default_email_templates(
    State(state): State<AppState>,
) -> Result<Json<EmailTemplate>, ApiError> {
    Ok(Json(state.email_templates().ensure_invitation_default().await?))
}

/// POST /api/v1/admin/cms/email-templates/import-missing
///
/// Ensures all five shipped templates. Existing ones are overwritten.
pub async fn import_missing_email_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailTemplate>>, ApiError> {
    let seeded = state
        .email_templates()
        .ensure_all_defaults()
        .await
        .map_err(DomainError::from)?;
    Ok(Json(seeded.into_iter().map(|s| s.entity).collect()))
}

// Notification templates

#[derive(Debug, Default, Deserialize)]
pub struct NotificationTemplateListQuery {
    pub template_type: Option<String>,
    pub category: Option<String>,
}

impl NotificationTemplateListQuery {
    fn into_filter(self) -> Result<NotificationTemplateFilter, DomainError> {
        let template_type = match self.template_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<TemplateType>()?),
        };
        let category = self
            .category
            .as_deref()
            .and_then(shared::validation::trimmed_non_empty)
            .map(str::to_string);
        Ok(NotificationTemplateFilter {
            template_type,
            category,
        })
    }
}

/// GET /api/v1/admin/cms/notification-templates
pub async fn list_notification_templates(
    State(state): State<AppState>,
    Query(query): Query<NotificationTemplateListQuery>,
) -> Result<Json<Vec<NotificationTemplate>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(state.notification_templates().list(&filter).await?))
}

/// GET /api/v1/admin/cms/notification-templates/:id
pub async fn get_notification_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationTemplate>, ApiError> {
    Ok(Json(state.notification_templates().get(id).await?))
}

/// POST /api/v1/admin/cms/notification-templates
pub async fn create_notification_template(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationTemplateRequest>,
) -> Result<(StatusCode, Json<NotificationTemplate>), ApiError> {
    request.validate()?;
    let template = state.notification_templates().create(request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/admin/cms/notification-templates/:id
pub async fn update_notification_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNotificationTemplateRequest>,
) -> Result<Json<NotificationTemplate>, ApiError> {
    request.validate()?;
    Ok(Json(state.notification_templates().update(id, request).await?))
}

/// DELETE /api/v1/admin/cms/notification-templates/:id
pub async fn delete_notification_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.notification_templates().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/cms/notification-templates/import-missing
///
/// Returns only the templates created by this call.
pub async fn import_missing_notification_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationTemplate>>, ApiError> {
    let created = state
        .notification_templates()
        .import_missing_defaults()
        .await?;
    info!(created = created.len(), "Imported missing notification templates");
    Ok(Json(created))
}

// Shared

/// GET /api/v1/admin/cms/variables
pub async fn supported_template_variables() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(supported_variables())
}

/// POST /api/v1/admin/cms/seed
///
/// Runs all three default batches in order.
pub async fn seed_defaults(State(state): State<AppState>) -> Result<Json<SeedReport>, ApiError> {
    Ok(Json(run_seeding(&state).await?))
}
