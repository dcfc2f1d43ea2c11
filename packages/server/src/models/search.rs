use serde::Deserialize;

use crate::error::AppError;

/// Default number of recommendations when the caller does not ask for one.
pub const DEFAULT_RECOMMEND_LIMIT: u64 = 5;

/// Maximum number of recommendations a caller may request.
pub const MAX_RECOMMEND_LIMIT: u64 = 20;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Search term, at least 2 characters after trimming.
    pub query: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct RecommendQuery {
    /// Maximum number of recommendations, 1-20. Defaults to 5.
    pub limit: Option<u64>,
}

pub fn validate_search_query(query: &str) -> Result<(), AppError> {
    if query.trim().chars().count() < 2 {
        return Err(AppError::Validation(
            "Search query must be at least 2 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_recommend_limit(limit: u64) -> Result<(), AppError> {
    if !(1..=MAX_RECOMMEND_LIMIT).contains(&limit) {
        return Err(AppError::Validation("Limit must be between 1 and 20".into()));
    }
    Ok(())
}
