use std::collections::HashSet;

use sea_orm::*;

use crate::entity::{ai_analysis, content};
use crate::services::search::contains_ci;

/// Topic-overlap recommendations: other public content sharing any of the
/// target's leading topics.
pub struct RecommendationService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RecommendationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns up to `limit` public content items whose topic list or title
    /// contains one of the target's first three topics. A missing target or
    /// a target without an analysis yields an empty list, not an error.
    ///
    /// Per-topic result sets are concatenated in topic order and deduplicated
    /// by content id, keeping the first occurrence; within one topic, rows
    /// come back in id order.
    pub async fn recommend(
        &self,
        content_id: i32,
        limit: u64,
    ) -> Result<Vec<(content::Model, Option<ai_analysis::Model>)>, DbErr> {
        let target = content::Entity::find_by_id(content_id)
            .find_also_related(ai_analysis::Entity)
            .one(self.conn)
            .await?;

        let Some((_, Some(analysis))) = target else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut recommendations = Vec::new();

        for topic in leading_topics(&analysis.topics) {
            let matches = content::Entity::find()
                .find_also_related(ai_analysis::Entity)
                .filter(content::Column::Id.ne(content_id))
                .filter(content::Column::IsPublic.eq(true))
                .filter(
                    Condition::any()
                        .add(contains_ci(
                            (ai_analysis::Entity, ai_analysis::Column::Topics),
                            &topic,
                        ))
                        .add(contains_ci((content::Entity, content::Column::Title), &topic)),
                )
                .order_by_asc(content::Column::Id)
                .limit(limit)
                .all(self.conn)
                .await?;

            for row in matches {
                if seen.insert(row.0.id) {
                    recommendations.push(row);
                }
            }
        }

        recommendations.truncate(limit as usize);
        Ok(recommendations)
    }
}

/// The first three comma-separated topics, trimmed. Blank entries are
/// dropped: an empty topic would turn the substring predicate into a
/// match-everything filter.
fn leading_topics(topics: &str) -> Vec<String> {
    topics
        .split(',')
        .take(3)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
