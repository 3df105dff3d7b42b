//! Tag catalog collaborator: name resolution for tag ids and tag links.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::errors::Result;
use crate::db::models::tags::{LivestreamTagNameRow, TagRow};
use crate::types::{LivestreamId, TagId};

pub struct Tags<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Tags<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Resolve tag ids to catalog names, keyed by id. Ids with no catalog
    /// entry are simply absent from the map.
    #[instrument(skip(self, tag_ids), fields(count = tag_ids.len()), err)]
    pub async fn resolve_names(&mut self, tag_ids: &[TagId]) -> Result<HashMap<TagId, String>> {
        if tag_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE id = ANY($1)")
            .bind(tag_ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rows.into_iter().map(|t| (t.id, t.name)).collect())
    }

    /// Resolved tag links for many livestreams in one query, ordered by link
    /// id (association order). Links pointing at unknown tag ids drop out of
    /// the join, matching single-item resolution.
    #[instrument(skip(self, livestream_ids), fields(count = livestream_ids.len()), err)]
    pub async fn names_for_livestreams(&mut self, livestream_ids: &[LivestreamId]) -> Result<Vec<LivestreamTagNameRow>> {
        if livestream_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, LivestreamTagNameRow>(
            r#"
            SELECT livestream_tags.livestream_id, tags.id AS tag_id, tags.name
            FROM tags
            JOIN livestream_tags ON tags.id = livestream_tags.tag_id
            WHERE livestream_tags.livestream_id = ANY($1)
            ORDER BY livestream_tags.id
            "#,
        )
        .bind(livestream_ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }
}
