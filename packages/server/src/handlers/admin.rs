use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{ai_analysis, content};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::content::{delete_content_cascade, find_content};
use crate::models::content::{ContentListQuery, ContentListResponse, ContentResponse, Pagination};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/admin/content",
    tag = "Admin",
    operation_id = "adminListAllContent",
    summary = "List every content item",
    description = "Returns all content regardless of visibility or ownership, with analyses, paginated in id order. Admin only.",
    params(ContentListQuery),
    responses(
        (status = 200, description = "All content", body = ContentListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_all_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    auth_user.require_admin()?;

    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let total = content::Entity::find().count(&state.db).await?;
    let total_pages = total.div_ceil(per_page);

    let rows = content::Entity::find()
        .find_also_related(ai_analysis::Entity)
        .order_by_asc(content::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    Ok(Json(ContentListResponse {
        data: rows
            .into_iter()
            .map(|(c, a)| ContentResponse::from_parts(c, a))
            .collect(),
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/content/{id}",
    tag = "Admin",
    operation_id = "adminDeleteContent",
    summary = "Delete any content item",
    description = "Permanently deletes a content item and its analysis regardless of ownership. Admin only.",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn admin_delete_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;
    let model = find_content(&txn, id).await?;
    delete_content_cascade(&txn, model.id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
