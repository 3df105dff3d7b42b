//! Database models for identity composition.

use sqlx::FromRow;

use crate::types::UserId;

/// Joined identity row: user, theme, and the raw icon bytes when the user has
/// uploaded one. Hashing and fallback handling happen in the repository.
#[derive(Debug, Clone, FromRow)]
pub struct OwnerIdentityRow {
    pub user_id: UserId,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub theme_id: i64,
    pub dark_mode: bool,
    pub image: Option<Vec<u8>>,
}
