//! API models for composed owner identities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::UserId;

/// Presentation theme chosen by a user, composed into their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Theme {
    pub id: i64,
    pub dark_mode: bool,
}

/// Fully composed owner identity: profile, theme, and the content hash of the
/// user's icon (or of the configured fallback image when none is uploaded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub theme: Theme,
    pub icon_hash: String,
}

/// The verified identity of the requester, produced once by session
/// verification and threaded explicitly into booking and listing operations.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
}
