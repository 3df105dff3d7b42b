//! Database models for livestreams and their tag links.

use sqlx::FromRow;

use crate::api::models::livestreams::ReserveLivestreamRequest;
use crate::types::{LivestreamId, TagId, UserId};

/// A stored livestream record, exactly as persisted. The composed read model
/// (owner identity + tag names) is built from this by the composer.
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamRow {
    pub id: LivestreamId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
}

/// Database request for creating a livestream together with its tag links
#[derive(Debug, Clone)]
pub struct LivestreamCreateDBRequest {
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
    /// Tag ids in request order; one link row is inserted per entry.
    pub tag_ids: Vec<TagId>,
}

impl From<ReserveLivestreamRequest> for LivestreamCreateDBRequest {
    fn from(api: ReserveLivestreamRequest) -> Self {
        Self {
            title: api.title,
            description: api.description,
            playlist_url: api.playlist_url,
            thumbnail_url: api.thumbnail_url,
            start_at: api.start_at,
            end_at: api.end_at,
            tag_ids: api.tags,
        }
    }
}

/// One livestream-to-tag association row. Rows are insertion-ordered by `id`.
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamTagRow {
    pub id: i64,
    pub livestream_id: LivestreamId,
    pub tag_id: TagId,
}
