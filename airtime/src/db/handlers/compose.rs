//! Response composition: stored records joined with owner identities and tag
//! names, single-item and batched.
//!
//! Batch mode exists so listings never pay one identity/tag round-trip per
//! record. Its output is required to be indistinguishable from composing each
//! record on its own - both paths share the same row assembly and the tests
//! hold them to it.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::api::models::livestreams::LivestreamResponse;
use crate::api::models::tags::Tag;
use crate::api::models::users::UserResponse;
use crate::config::Config;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::livestreams::Livestreams;
use crate::db::handlers::tags::Tags;
use crate::db::handlers::users::Users;
use crate::db::models::livestreams::LivestreamRow;
use crate::types::LivestreamId;

pub struct LivestreamComposer<'c> {
    db: &'c mut PgConnection,
}

impl<'c> LivestreamComposer<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Compose the full read model for one record.
    #[instrument(skip(self, record, config), fields(livestream_id = record.id), err)]
    pub async fn compose_one(&mut self, record: &LivestreamRow, config: &Config) -> Result<LivestreamResponse> {
        let owner = Users::new(&mut *self.db)
            .get_identity(record.user_id, config)
            .await?
            .ok_or(DbError::NotFound)?;

        let links = Livestreams::new(&mut *self.db).tag_links(record.id).await?;
        let tag_ids: Vec<i64> = links.iter().map(|l| l.tag_id).collect();
        let names = Tags::new(&mut *self.db).resolve_names(&tag_ids).await?;

        // Association order, links without a catalog entry dropped.
        let tags = links
            .iter()
            .filter_map(|link| {
                names.get(&link.tag_id).map(|name| Tag {
                    id: link.tag_id,
                    name: name.clone(),
                })
            })
            .collect();

        Ok(assemble(record, owner, tags))
    }

    /// Compose read models for many records using one batched identity fetch
    /// and one batched tag fetch, joined back in memory.
    #[instrument(skip(self, records, config), fields(count = records.len()), err)]
    pub async fn compose_batch(&mut self, records: &[LivestreamRow], config: &Config) -> Result<Vec<LivestreamResponse>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut owner_ids: Vec<i64> = records.iter().map(|r| r.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners = Users::new(&mut *self.db).get_identities_bulk(&owner_ids, config).await?;

        let livestream_ids: Vec<LivestreamId> = records.iter().map(|r| r.id).collect();
        let tag_rows = Tags::new(&mut *self.db).names_for_livestreams(&livestream_ids).await?;

        // Rows arrive in link-id order, so per-record vectors keep it.
        let mut tags_by_livestream: HashMap<LivestreamId, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags_by_livestream.entry(row.livestream_id).or_default().push(Tag {
                id: row.tag_id,
                name: row.name,
            });
        }

        records
            .iter()
            .map(|record| {
                let owner = owners.get(&record.user_id).cloned().ok_or(DbError::NotFound)?;
                let tags = tags_by_livestream.remove(&record.id).unwrap_or_default();
                Ok(assemble(record, owner, tags))
            })
            .collect()
    }
}

fn assemble(record: &LivestreamRow, owner: UserResponse, tags: Vec<Tag>) -> LivestreamResponse {
    LivestreamResponse {
        id: record.id,
        owner,
        title: record.title.clone(),
        description: record.description.clone(),
        playlist_url: record.playlist_url.clone(),
        thumbnail_url: record.thumbnail_url.clone(),
        tags,
        start_at: record.start_at,
        end_at: record.end_at,
    }
}
