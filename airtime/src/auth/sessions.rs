//! Session verification against the externally-seeded session store.
//!
//! Session issuance (login) is not this service's concern; it only verifies
//! presented tokens and resolves them to a typed identity.

use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

use crate::api::models::users::CurrentUser;
use crate::db::errors::Result;
use crate::types::UserId;

#[derive(Debug, Clone, FromRow)]
struct SessionUserRow {
    id: UserId,
    name: String,
    display_name: String,
}

pub struct Sessions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Sessions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Resolve a session token to its user, if the session exists and has not
    /// expired.
    #[instrument(skip(self, token), err)]
    pub async fn verify(&mut self, token: Uuid) -> Result<Option<CurrentUser>> {
        let row = sqlx::query_as::<_, SessionUserRow>(
            r#"
            SELECT users.id, users.name, users.display_name
            FROM user_sessions
            JOIN users ON users.id = user_sessions.user_id
            WHERE user_sessions.token = $1 AND user_sessions.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(row.map(|row| CurrentUser {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
        }))
    }
}
