//! API models for livestream reservation and retrieval.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::tags::Tag;
use crate::api::models::users::UserResponse;
use crate::types::{LivestreamId, TagId};

/// Request body for creating a reservation. Times are unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReserveLivestreamRequest {
    /// Tag ids to associate, in order. Ids are not checked against the tag
    /// catalog at reservation time.
    #[serde(default)]
    pub tags: Vec<TagId>,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
}

/// The composed read model for one livestream: the stored record joined with
/// its owner identity and resolved tag names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LivestreamResponse {
    pub id: LivestreamId,
    pub owner: UserResponse,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    /// Tags in the order they were associated at creation time.
    pub tags: Vec<Tag>,
    pub start_at: i64,
    pub end_at: i64,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact tag name to filter by; omitted or empty means no filter
    pub tag: Option<String>,
    /// Maximum number of results to return
    pub limit: Option<i64>,
}
