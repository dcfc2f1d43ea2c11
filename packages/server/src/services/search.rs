use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::*;

use crate::entity::{ai_analysis, content};
use crate::models::content::PublicSummary;
use crate::models::shared::escape_like;

/// Case-insensitive substring predicate: `lower(col) LIKE %term%` with LIKE
/// wildcards escaped.
pub(crate) fn contains_ci<C: IntoColumnRef>(col: C, term: &str) -> SimpleExpr {
    let term = escape_like(term.trim());
    Expr::expr(Func::lower(Expr::col(col)))
        .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\'))
}

/// Query matches when the title, summary, or topic list contains the term.
fn match_predicate(term: &str) -> Condition {
    Condition::any()
        .add(contains_ci((content::Entity, content::Column::Title), term))
        .add(contains_ci(
            (ai_analysis::Entity, ai_analysis::Column::Summary),
            term,
        ))
        .add(contains_ci(
            (ai_analysis::Entity, ai_analysis::Column::Topics),
            term,
        ))
}

/// Substring search over analyzed content. Rows are returned in id order;
/// there is no relevance ranking.
pub struct SearchService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SearchService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Public content that has an analysis and matches the term, shaped as
    /// summary rows. Content without an analysis never appears here.
    pub async fn search_public(&self, term: &str) -> Result<Vec<PublicSummary>, DbErr> {
        content::Entity::find()
            .inner_join(ai_analysis::Entity)
            .filter(content::Column::IsPublic.eq(true))
            .filter(match_predicate(term))
            .select_only()
            .column(content::Column::Id)
            .column(content::Column::Title)
            .column(ai_analysis::Column::Summary)
            .column(ai_analysis::Column::Topics)
            .column(content::Column::CreatedAt)
            .order_by_asc(content::Column::Id)
            .into_model::<PublicSummary>()
            .all(self.conn)
            .await
    }

    /// One owner's analyzed content matching the term, regardless of
    /// visibility.
    pub async fn search_user(
        &self,
        term: &str,
        user_id: i32,
    ) -> Result<Vec<(content::Model, Option<ai_analysis::Model>)>, DbErr> {
        content::Entity::find()
            .find_also_related(ai_analysis::Entity)
            .filter(content::Column::UserId.eq(user_id))
            // Matching requires an analysis to exist.
            .filter(ai_analysis::Column::Id.is_not_null())
            .filter(match_predicate(term))
            .order_by_asc(content::Column::Id)
            .all(self.conn)
            .await
    }
}
