use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{ai_analysis, content};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::content::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/content",
    tag = "Content",
    operation_id = "createContent",
    summary = "Submit new content",
    description = "Stores a content item owned by the caller. When `raw_text` is non-empty the AI analysis (summary, sentiment, topics) is produced synchronously and returned with the content. If the provider and its fallback both fail, the content is still saved and 502 is returned.",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Analysis failed, content saved without it (ANALYSIS_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_content(&payload)?;

    let now = chrono::Utc::now();
    let new_content = content::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        url: Set(payload.url),
        raw_text: Set(payload.raw_text),
        user_id: Set(auth_user.user_id),
        is_public: Set(payload.is_public),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_content.insert(&state.db).await?;

    let analysis = match model.raw_text.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => Some(run_analysis(&state, model.id, text, None).await?),
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(ContentResponse::from_parts(model, analysis)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/content/public",
    tag = "Content",
    operation_id = "listPublicSummaries",
    summary = "List public content summaries",
    description = "Returns every public content item that has an analysis, as summary rows ordered by id. Content without an analysis is excluded. No authentication required.",
    responses(
        (status = 200, description = "Public summaries", body = Vec<PublicSummary>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_public_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicSummary>>, AppError> {
    let rows = content::Entity::find()
        .inner_join(ai_analysis::Entity)
        .filter(content::Column::IsPublic.eq(true))
        .select_only()
        .column(content::Column::Id)
        .column(content::Column::Title)
        .column(ai_analysis::Column::Summary)
        .column(ai_analysis::Column::Topics)
        .column(content::Column::CreatedAt)
        .order_by_asc(content::Column::Id)
        .into_model::<PublicSummary>()
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/content/{id}",
    tag = "Content",
    operation_id = "getContent",
    summary = "Get a content item by ID",
    description = "Returns the content with its analysis if one exists. Private content is only visible to its owner or an admin.",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content details", body = ContentResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Private content of another user (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContentResponse>, AppError> {
    let (model, analysis) = find_content_with_analysis(&state.db, id).await?;

    if !model.is_public && !auth_user.can_modify(model.user_id) {
        return Err(AppError::PermissionDenied);
    }

    Ok(Json(ContentResponse::from_parts(model, analysis)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/content/{id}",
    tag = "Content",
    operation_id = "updateContent",
    summary = "Update a content item",
    description = "Partially updates a content item using PATCH semantics — only provided fields are modified, and `url` set to JSON null is cleared. Requires ownership or admin. Providing a non-empty `raw_text` re-runs the AI analysis, replacing the stored one; an empty payload returns the stored row unchanged without re-analyzing.",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Re-analysis failed, field changes kept (ANALYSIS_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    validate_update_content(&payload)?;

    let (existing, analysis) = find_content_with_analysis(&state.db, id).await?;
    if !auth_user.can_modify(existing.user_id) {
        return Err(AppError::PermissionDenied);
    }

    if payload == UpdateContentRequest::default() {
        return Ok(Json(ContentResponse::from_parts(existing, analysis)));
    }

    let mut active: content::ActiveModel = existing.into();
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    match payload.url {
        Some(Some(url)) => active.url = Set(Some(url)),
        Some(None) => active.url = Set(None),
        None => {}
    }
    if let Some(ref raw_text) = payload.raw_text {
        active.raw_text = Set(Some(raw_text.clone()));
    }
    if let Some(is_public) = payload.is_public {
        active.is_public = Set(is_public);
    }
    active.updated_at = Set(chrono::Utc::now());

    // Field changes commit before the provider call so an analysis failure
    // cannot undo them.
    let model = active.update(&state.db).await?;

    let analysis = match payload.raw_text.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => Some(run_analysis(&state, model.id, text, analysis).await?),
        None => analysis,
    };

    Ok(Json(ContentResponse::from_parts(model, analysis)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/content/{id}",
    tag = "Content",
    operation_id = "deleteContent",
    summary = "Delete a content item",
    description = "Permanently deletes a content item and its analysis. Requires ownership or admin.",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let model = find_content(&txn, id).await?;
    if !auth_user.can_modify(model.user_id) {
        return Err(AppError::PermissionDenied);
    }

    delete_content_cascade(&txn, model.id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Run the analyzer and upsert the result for `content_id`.
///
/// An existing analysis row is replaced in place; otherwise a new row is
/// inserted. Provider failures propagate after the content write, so callers
/// return `ANALYSIS_FAILED` while the content row stays.
async fn run_analysis(
    state: &AppState,
    content_id: i32,
    text: &str,
    existing: Option<ai_analysis::Model>,
) -> Result<ai_analysis::Model, AppError> {
    let outcome = state.analyzer.analyze(text).await?;
    if outcome.is_fallback() {
        tracing::warn!(content_id, "analysis produced by per-field fallback path");
    }
    let analysis = outcome.into_analysis();

    let model = match existing {
        Some(existing) => {
            let mut active: ai_analysis::ActiveModel = existing.into();
            active.summary = Set(analysis.summary);
            active.sentiment = Set(analysis.sentiment.as_str().to_string());
            active.topics = Set(analysis.topics);
            active.created_at = Set(chrono::Utc::now());
            active.update(&state.db).await?
        }
        None => {
            ai_analysis::ActiveModel {
                content_id: Set(content_id),
                summary: Set(analysis.summary),
                sentiment: Set(analysis.sentiment.as_str().to_string()),
                topics: Set(analysis.topics),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            }
            .insert(&state.db)
            .await?
        }
    };

    Ok(model)
}

/// Delete a content row and its analysis. The analysis goes first so no
/// orphan row can survive; callers wrap this in a transaction.
pub(crate) async fn delete_content_cascade<C: ConnectionTrait>(
    conn: &C,
    content_id: i32,
) -> Result<(), AppError> {
    ai_analysis::Entity::delete_many()
        .filter(ai_analysis::Column::ContentId.eq(content_id))
        .exec(conn)
        .await?;
    content::Entity::delete_by_id(content_id).exec(conn).await?;
    Ok(())
}

pub(crate) async fn find_content<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<content::Model, AppError> {
    content::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".into()))
}

async fn find_content_with_analysis<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<(content::Model, Option<ai_analysis::Model>), AppError> {
    content::Entity::find_by_id(id)
        .find_also_related(ai_analysis::Entity)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".into()))
}
