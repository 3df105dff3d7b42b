use sqlx::FromRow;

use crate::types::{LivestreamId, TagId};

/// A tag-catalog row.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: TagId,
    pub name: String,
}

/// A tag link joined with its resolved catalog name, for batch composition.
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamTagNameRow {
    pub livestream_id: LivestreamId,
    pub tag_id: TagId,
    pub name: String,
}
