use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role granted to administrative accounts.
pub const ADMIN_ROLE: &str = "admin";

/// Role of regular accounts.
pub const DEFAULT_ROLE: &str = "member";

/// Content owners. Account lifecycle (registration, credentials) is managed
/// by the external identity service that shares this database; this service
/// only reads the table and relies on it for ownership integrity.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub role: String,

    #[sea_orm(has_many)]
    pub contents: HasMany<super::content::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
