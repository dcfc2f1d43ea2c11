use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_text: Option<String>,
    pub is_public: bool,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// Zero or one derived analysis; replaced on re-analysis, removed with
    /// the content row.
    #[sea_orm(has_one)]
    pub analysis: HasOne<super::ai_analysis::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
