use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    AppState,
    api::models::{
        livestreams::{LivestreamResponse, ReserveLivestreamRequest, SearchQuery},
        users::CurrentUser,
    },
    db::{
        errors::DbError,
        handlers::{Bookings, LivestreamComposer, Livestreams, Users},
        models::livestreams::LivestreamCreateDBRequest,
    },
    errors::{Error, Result},
    types::LivestreamId,
};

/// Create a reservation
#[utoipa::path(
    post,
    path = "/livestream/reservation",
    tag = "livestreams",
    summary = "Reserve a livestream window",
    request_body = ReserveLivestreamRequest,
    responses(
        (status = 201, description = "Reservation created", body = LivestreamResponse),
        (status = 400, description = "Malformed or out-of-term time range"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A covered slot has no remaining capacity"),
        (status = 503, description = "Lock contention, retry later"),
    ),
    security(("session_token" = []))
)]
pub async fn reserve_livestream(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ReserveLivestreamRequest>,
) -> Result<(StatusCode, Json<LivestreamResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let db_request = LivestreamCreateDBRequest::from(request);
    let livestream = Bookings::new(&mut conn)
        .reserve(current_user.id, &db_request, &state.config)
        .await?;

    Ok((StatusCode::CREATED, Json(livestream)))
}

/// Search livestreams, optionally by tag name
#[utoipa::path(
    get,
    path = "/livestream/search",
    tag = "livestreams",
    summary = "Search livestreams",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching livestreams, newest first", body = [LivestreamResponse]),
    )
)]
pub async fn search_livestreams(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Result<Json<Vec<LivestreamResponse>>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(DbError::from(e)))?;

    let records = match query.tag.as_deref().filter(|t| !t.is_empty()) {
        Some(tag) => Livestreams::new(&mut tx).search_by_tag_name(tag, query.limit).await?,
        None => Livestreams::new(&mut tx).list(query.limit).await?,
    };
    let livestreams = LivestreamComposer::new(&mut tx).compose_batch(&records, &state.config).await?;

    tx.commit().await.map_err(|e| Error::Database(DbError::from(e)))?;

    Ok(Json(livestreams))
}

/// List the authenticated user's livestreams
#[utoipa::path(
    get,
    path = "/livestream/me",
    tag = "livestreams",
    summary = "List own livestreams",
    responses(
        (status = 200, description = "Livestreams owned by the requester", body = [LivestreamResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_token" = []))
)]
pub async fn get_my_livestreams(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<LivestreamResponse>>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(DbError::from(e)))?;

    let records = Livestreams::new(&mut tx).list_by_owner(current_user.id).await?;
    let livestreams = LivestreamComposer::new(&mut tx).compose_batch(&records, &state.config).await?;

    tx.commit().await.map_err(|e| Error::Database(DbError::from(e)))?;

    Ok(Json(livestreams))
}

/// List livestreams owned by the named user
#[utoipa::path(
    get,
    path = "/user/{username}/livestream",
    tag = "livestreams",
    summary = "List a user's livestreams",
    params(("username" = String, Path, description = "Identity name of the owner")),
    responses(
        (status = 200, description = "Livestreams owned by the user", body = [LivestreamResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No user with that name"),
    ),
    security(("session_token" = []))
)]
pub async fn get_user_livestreams(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(username): Path<String>,
) -> Result<Json<Vec<LivestreamResponse>>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(DbError::from(e)))?;

    let owner_id = Users::new(&mut tx).id_by_name(&username).await?.ok_or_else(|| Error::NotFound {
        resource: "user".to_string(),
        id: username.clone(),
    })?;

    let records = Livestreams::new(&mut tx).list_by_owner(owner_id).await?;
    let livestreams = LivestreamComposer::new(&mut tx).compose_batch(&records, &state.config).await?;

    tx.commit().await.map_err(|e| Error::Database(DbError::from(e)))?;

    Ok(Json(livestreams))
}

/// Fetch one livestream by id
#[utoipa::path(
    get,
    path = "/livestream/{livestream_id}",
    tag = "livestreams",
    summary = "Get a livestream",
    params(("livestream_id" = i64, Path, description = "Livestream id")),
    responses(
        (status = 200, description = "The composed livestream", body = LivestreamResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No livestream with that id"),
    ),
    security(("session_token" = []))
)]
pub async fn get_livestream(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(livestream_id): Path<LivestreamId>,
) -> Result<Json<LivestreamResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(DbError::from(e)))?;

    let record = Livestreams::new(&mut tx)
        .get_by_id(livestream_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "livestream".to_string(),
            id: livestream_id.to_string(),
        })?;
    let livestream = LivestreamComposer::new(&mut tx).compose_one(&record, &state.config).await?;

    tx.commit().await.map_err(|e| Error::Database(DbError::from(e)))?;

    Ok(Json(livestream))
}
