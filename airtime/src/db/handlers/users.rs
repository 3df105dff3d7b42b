//! Identity store collaborator: composed owner identities, single and batch.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use sqlx::PgConnection;
use tracing::instrument;

use crate::api::models::users::{Theme, UserResponse};
use crate::config::Config;
use crate::db::errors::{DbError, Result};
use crate::db::models::users::OwnerIdentityRow;
use crate::types::UserId;

const IDENTITY_QUERY: &str = r#"
    SELECT
        users.id AS user_id,
        users.name,
        users.display_name,
        users.description,
        themes.id AS theme_id,
        themes.dark_mode,
        icons.image
    FROM users
    JOIN themes ON themes.user_id = users.id
    LEFT JOIN icons ON icons.user_id = users.id
"#;

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Compose the identity for one user: profile, theme, icon content hash.
    #[instrument(skip(self, config), err)]
    pub async fn get_identity(&mut self, id: UserId, config: &Config) -> Result<Option<UserResponse>> {
        let row = sqlx::query_as::<_, OwnerIdentityRow>(&format!("{IDENTITY_QUERY} WHERE users.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(compose_identity(row, config).await?)),
            None => Ok(None),
        }
    }

    /// Compose identities for many users with a single query, keyed by id.
    #[instrument(skip(self, ids, config), fields(count = ids.len()), err)]
    pub async fn get_identities_bulk(&mut self, ids: &[UserId], config: &Config) -> Result<HashMap<UserId, UserResponse>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, OwnerIdentityRow>(&format!("{IDENTITY_QUERY} WHERE users.id = ANY($1)"))
            .bind(ids)
            .fetch_all(&mut *self.db)
            .await?;

        let mut identities = HashMap::with_capacity(rows.len());
        for row in rows {
            let id = row.user_id;
            identities.insert(id, compose_identity(row, config).await?);
        }
        Ok(identities)
    }

    /// Resolve an identity name to its user id.
    #[instrument(skip(self), err)]
    pub async fn id_by_name(&mut self, name: &str) -> Result<Option<UserId>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(id)
    }
}

/// Shared by the single and batch paths so both compose byte-identical
/// identities. Users without an uploaded icon get the hash of the configured
/// fallback image, exactly as if they had uploaded it.
async fn compose_identity(row: OwnerIdentityRow, config: &Config) -> Result<UserResponse> {
    let image = match row.image {
        Some(image) => image,
        None => tokio::fs::read(&config.fallback_icon).await.map_err(|e| {
            DbError::Other(anyhow::Error::new(e).context(format!("failed to read fallback icon {}", config.fallback_icon.display())))
        })?,
    };
    let icon_hash = hex::encode(Sha256::digest(&image));

    Ok(UserResponse {
        id: row.user_id,
        name: row.name,
        display_name: row.display_name,
        description: row.description,
        theme: Theme {
            id: row.theme_id,
            dark_mode: row.dark_mode,
        },
        icon_hash,
    })
}
