//! Extraction of the verified requester identity from a request.
//!
//! Produces the typed [`CurrentUser`] once per request; handlers receive it
//! as an explicit argument rather than digging identity out of an opaque
//! session container.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};
use uuid::Uuid;

use crate::AppState;
use crate::api::models::users::CurrentUser;
use crate::auth::sessions::Sessions;
use crate::db::errors::DbError;
use crate::errors::{Error, Result};

/// Pull the bearer token out of the Authorization header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Some(token) = bearer_token(parts) else {
            trace!("no session token presented");
            return Err(Error::Unauthenticated { message: None });
        };

        let token: Uuid = token.parse().map_err(|_| Error::Unauthenticated {
            message: Some("malformed session token".to_string()),
        })?;

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(DbError::from(e)))?;
        match Sessions::new(&mut conn).verify(token).await? {
            Some(user) => Ok(user),
            None => Err(Error::Unauthenticated {
                message: Some("session expired or unknown".to_string()),
            }),
        }
    }
}
