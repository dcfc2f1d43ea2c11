use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::{ai_analysis, content};
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{double_option, validate_title, validate_url};

/// Maximum accepted length of a raw text body (1 MB).
const MAX_RAW_TEXT_BYTES: usize = 1_000_000;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContentRequest {
    /// Display title (1-256 characters).
    #[schema(example = "Why borrow checkers matter")]
    pub title: String,
    /// Optional source URL.
    #[schema(example = "https://example.com/post")]
    pub url: Option<String>,
    /// Optional text body. When present and non-empty, an AI analysis is
    /// produced before the response returns.
    pub raw_text: Option<String>,
    /// Public content is readable by anyone; private only by owner or admin.
    #[serde(default)]
    pub is_public: bool,
}

/// PATCH body: absent fields stay unchanged; `url` set to JSON `null` clears
/// the stored URL.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    pub raw_text: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalysisResponse {
    pub summary: String,
    /// One of: positive, negative, neutral.
    #[schema(example = "positive")]
    pub sentiment: String,
    /// Comma-separated topic phrases, in provider order.
    #[schema(example = "rust, web backends, llm")]
    pub topics: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub url: Option<String>,
    pub raw_text: Option<String>,
    pub user_id: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ai_analysis: Option<AnalysisResponse>,
}

/// Public listing/search row: content joined with its analysis.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct PublicSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub topics: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentListResponse {
    pub data: Vec<ContentResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContentListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl From<ai_analysis::Model> for AnalysisResponse {
    fn from(m: ai_analysis::Model) -> Self {
        Self {
            summary: m.summary,
            sentiment: m.sentiment,
            topics: m.topics,
            created_at: m.created_at,
        }
    }
}

impl ContentResponse {
    pub fn from_parts(content: content::Model, analysis: Option<ai_analysis::Model>) -> Self {
        Self {
            id: content.id,
            title: content.title,
            url: content.url,
            raw_text: content.raw_text,
            user_id: content.user_id,
            is_public: content.is_public,
            created_at: content.created_at,
            updated_at: content.updated_at,
            ai_analysis: analysis.map(AnalysisResponse::from),
        }
    }
}

fn validate_raw_text(raw_text: &str) -> Result<(), AppError> {
    if raw_text.len() > MAX_RAW_TEXT_BYTES {
        return Err(AppError::Validation("Text body must be at most 1MB".into()));
    }
    Ok(())
}

pub fn validate_create_content(req: &CreateContentRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if let Some(ref url) = req.url {
        validate_url(url)?;
    }
    if let Some(ref raw_text) = req.raw_text {
        validate_raw_text(raw_text)?;
    }
    Ok(())
}

pub fn validate_update_content(req: &UpdateContentRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(Some(ref url)) = req.url {
        validate_url(url)?;
    }
    if let Some(ref raw_text) = req.raw_text {
        validate_raw_text(raw_text)?;
    }
    Ok(())
}
