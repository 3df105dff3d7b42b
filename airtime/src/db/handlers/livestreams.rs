//! Repository for stored livestream records and their tag links.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::errors::Result;
use crate::db::models::livestreams::{LivestreamCreateDBRequest, LivestreamRow, LivestreamTagRow};
use crate::types::{LivestreamId, UserId};

const LIVESTREAM_COLUMNS: &str = "id, user_id, title, description, playlist_url, thumbnail_url, start_at, end_at";

pub struct Livestreams<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Livestreams<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert the livestream record and return it with its generated id.
    /// Capacity consumption and tag linking are sequenced by the booking
    /// coordinator within the same transaction.
    #[instrument(skip(self, request), fields(title = %request.title), err)]
    pub async fn insert(&mut self, owner_id: UserId, request: &LivestreamCreateDBRequest) -> Result<LivestreamRow> {
        let row = sqlx::query_as::<_, LivestreamRow>(&format!(
            r#"
            INSERT INTO livestreams (user_id, title, description, playlist_url, thumbnail_url, start_at, end_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LIVESTREAM_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.playlist_url)
        .bind(&request.thumbnail_url)
        .bind(request.start_at)
        .bind(request.end_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row)
    }

    /// Insert one tag link per id, preserving request order. Ids are not
    /// checked against the tag catalog.
    #[instrument(skip(self, tag_ids), fields(count = tag_ids.len()), err)]
    pub async fn link_tags(&mut self, livestream_id: LivestreamId, tag_ids: &[i64]) -> Result<()> {
        for tag_id in tag_ids {
            sqlx::query("INSERT INTO livestream_tags (livestream_id, tag_id) VALUES ($1, $2)")
                .bind(livestream_id)
                .bind(tag_id)
                .execute(&mut *self.db)
                .await?;
        }
        Ok(())
    }

    /// Tag links for one livestream in association order.
    #[instrument(skip(self), err)]
    pub async fn tag_links(&mut self, livestream_id: LivestreamId) -> Result<Vec<LivestreamTagRow>> {
        let links = sqlx::query_as::<_, LivestreamTagRow>(
            "SELECT id, livestream_id, tag_id FROM livestream_tags WHERE livestream_id = $1 ORDER BY id",
        )
        .bind(livestream_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(links)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: LivestreamId) -> Result<Option<LivestreamRow>> {
        let row = sqlx::query_as::<_, LivestreamRow>(&format!("SELECT {LIVESTREAM_COLUMNS} FROM livestreams WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row)
    }

    /// All livestreams, newest id first. `LIMIT NULL` means no limit.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, limit: Option<i64>) -> Result<Vec<LivestreamRow>> {
        let rows = sqlx::query_as::<_, LivestreamRow>(&format!(
            "SELECT {LIVESTREAM_COLUMNS} FROM livestreams ORDER BY id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    /// Livestreams carrying a tag with the given catalog name, newest id
    /// first.
    #[instrument(skip(self), err)]
    pub async fn search_by_tag_name(&mut self, tag_name: &str, limit: Option<i64>) -> Result<Vec<LivestreamRow>> {
        let rows = sqlx::query_as::<_, LivestreamRow>(
            r#"
            SELECT
                livestreams.id,
                livestreams.user_id,
                livestreams.title,
                livestreams.description,
                livestreams.playlist_url,
                livestreams.thumbnail_url,
                livestreams.start_at,
                livestreams.end_at
            FROM livestreams
            JOIN livestream_tags ON livestreams.id = livestream_tags.livestream_id
            JOIN tags ON livestream_tags.tag_id = tags.id
            WHERE tags.name = $1
            ORDER BY livestreams.id DESC
            LIMIT $2
            "#,
        )
        .bind(tag_name)
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    /// All livestreams owned by one user, newest id first.
    #[instrument(skip(self), err)]
    pub async fn list_by_owner(&mut self, owner_id: UserId) -> Result<Vec<LivestreamRow>> {
        let rows = sqlx::query_as::<_, LivestreamRow>(&format!(
            "SELECT {LIVESTREAM_COLUMNS} FROM livestreams WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(owner_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }
}
