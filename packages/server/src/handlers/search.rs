use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::content::{ContentResponse, PublicSummary};
use crate::models::search::{
    DEFAULT_RECOMMEND_LIMIT, RecommendQuery, SearchQuery, validate_recommend_limit,
    validate_search_query,
};
use crate::services::recommend::RecommendationService;
use crate::services::search::SearchService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/search/public",
    tag = "Search",
    operation_id = "searchPublic",
    summary = "Search public content",
    description = "Case-insensitive substring search over title, summary, and topics of public content that has an analysis. No authentication required. Results are in id order; there is no relevance ranking.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching public summaries", body = Vec<PublicSummary>),
        (status = 400, description = "Query shorter than 2 characters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn search_public(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<PublicSummary>>, AppError> {
    validate_search_query(&params.query)?;

    let results = SearchService::new(&state.db)
        .search_public(params.query.trim())
        .await?;

    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/v1/search/user",
    tag = "Search",
    operation_id = "searchUserContent",
    summary = "Search the caller's own content",
    description = "Case-insensitive substring search over the caller's analyzed content, public and private alike.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching content", body = Vec<ContentResponse>),
        (status = 400, description = "Query shorter than 2 characters (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, params), fields(user_id = auth_user.user_id))]
pub async fn search_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ContentResponse>>, AppError> {
    validate_search_query(&params.query)?;

    let rows = SearchService::new(&state.db)
        .search_user(params.query.trim(), auth_user.user_id)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(c, a)| ContentResponse::from_parts(c, a))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/search/recommend/{content_id}",
    tag = "Search",
    operation_id = "recommendContent",
    summary = "Recommend related public content",
    description = "Finds other public content sharing any of the target's first three topics (matched against topic lists and titles, case-insensitively), deduplicated in topic order and truncated to `limit`. A missing target or one without an analysis returns an empty list. No authentication required.",
    params(
        ("content_id" = i32, Path, description = "Content ID to recommend for"),
        RecommendQuery,
    ),
    responses(
        (status = 200, description = "Recommended content", body = Vec<ContentResponse>),
        (status = 400, description = "Limit outside 1-20 (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params), fields(content_id))]
pub async fn recommend(
    State(state): State<AppState>,
    Path(content_id): Path<i32>,
    Query(params): Query<RecommendQuery>,
) -> Result<Json<Vec<ContentResponse>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_RECOMMEND_LIMIT);
    validate_recommend_limit(limit)?;

    let rows = RecommendationService::new(&state.db)
        .recommend(content_id, limit)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(c, a)| ContentResponse::from_parts(c, a))
            .collect(),
    ))
}
