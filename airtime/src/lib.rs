//! airtime - livestream airtime reservation and composition service.
//!
//! Schedules livestream broadcasts against a finite, time-sliced capacity
//! calendar and serves composed broadcast records to readers. Bookings
//! consume per-hour slot capacity under row-level pessimistic locks, so
//! overbooking cannot happen even across multiple server processes sharing
//! one database; reads assemble a denormalized aggregate (owner identity +
//! tag names) with batched lookups instead of one round-trip per record.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ api::handlers│  (axum route handlers)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ db::handlers │  (repositories: inventory, bookings, composition)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! Identity, tag catalog and session issuance are external collaborators:
//! their tables are seeded by other systems and only read here.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

pub use config::Config;

use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use utoipa::OpenApi as _;

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the airtime database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/livestream/reservation", post(api::handlers::livestreams::reserve_livestream))
        .route("/livestream/search", get(api::handlers::livestreams::search_livestreams))
        .route("/livestream/me", get(api::handlers::livestreams::get_my_livestreams))
        .route("/livestream/{livestream_id}", get(api::handlers::livestreams::get_livestream))
        .route("/user/{username}/livestream", get(api::handlers::livestreams::get_user_livestreams))
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::response::Json(openapi::ApiDoc::openapi()) }),
        )
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// The running service: connection pool, migrations, router.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting airtime with configuration: {:#?}", config);

        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .min_connections(config.pool.min_connections)
            .connect(config.database_url.as_str())
            .await
            .context("failed to connect to database")?;

        migrator().run(&pool).await.context("failed to run database migrations")?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("airtime listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::api::models::livestreams::LivestreamResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    const HOUR: i64 = 3600;

    fn reservation_body(start_at: i64, end_at: i64, tags: &[i64]) -> serde_json::Value {
        json!({
            "tags": tags,
            "title": "launch party",
            "description": "first broadcast",
            "playlist_url": "https://media.example.com/playlist.m3u8",
            "thumbnail_url": "https://media.example.com/thumb.jpg",
            "start_at": start_at,
            "end_at": end_at,
        })
    }

    #[sqlx::test]
    #[test_log::test]
    async fn reservation_round_trip_over_http(pool: PgPool) {
        let config = create_test_config();
        let t0 = config.term.start_unix();
        let alice = create_test_user(&pool, "alice").await;
        let token = create_test_session(&pool, alice).await;
        let music = create_test_tag(&pool, "music").await;
        let talk = create_test_tag(&pool, "talk").await;
        seed_hourly_slots(&pool, t0, 1, 1).await;

        let server = create_test_server(pool.clone());

        let created = server
            .post("/api/livestream/reservation")
            .authorization_bearer(&token.to_string())
            .json(&reservation_body(t0, t0 + HOUR, &[talk, music]))
            .await;
        created.assert_status(StatusCode::CREATED);
        let livestream: LivestreamResponse = created.json();
        assert_eq!(livestream.owner.name, "alice");
        let tag_ids: Vec<i64> = livestream.tags.iter().map(|t| t.id).collect();
        assert_eq!(tag_ids, vec![talk, music]);

        let fetched = server
            .get(&format!("/api/livestream/{}", livestream.id))
            .authorization_bearer(&token.to_string())
            .await;
        fetched.assert_status(StatusCode::OK);
        let fetched: LivestreamResponse = fetched.json();
        assert_eq!(
            serde_json::to_value(&fetched).unwrap(),
            serde_json::to_value(&livestream).unwrap()
        );

        let mine = server.get("/api/livestream/me").authorization_bearer(&token.to_string()).await;
        mine.assert_status(StatusCode::OK);
        let mine: Vec<LivestreamResponse> = mine.json();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, livestream.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn second_booking_of_a_full_hour_conflicts(pool: PgPool) {
        let config = create_test_config();
        let t0 = config.term.start_unix();
        let alice = create_test_user(&pool, "alice").await;
        let token = create_test_session(&pool, alice).await;
        seed_hourly_slots(&pool, t0, 1, 1).await;

        let server = create_test_server(pool.clone());

        let first = server
            .post("/api/livestream/reservation")
            .authorization_bearer(&token.to_string())
            .json(&reservation_body(t0, t0 + HOUR, &[]))
            .await;
        first.assert_status(StatusCode::CREATED);

        let second = server
            .post("/api/livestream/reservation")
            .authorization_bearer(&token.to_string())
            .json(&reservation_body(t0, t0 + HOUR, &[]))
            .await;
        second.assert_status(StatusCode::CONFLICT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn out_of_term_reservation_is_a_bad_request(pool: PgPool) {
        let config = create_test_config();
        let term_end = config.term.end_unix();
        let alice = create_test_user(&pool, "alice").await;
        let token = create_test_session(&pool, alice).await;

        let server = create_test_server(pool.clone());

        let response = server
            .post("/api/livestream/reservation")
            .authorization_bearer(&token.to_string())
            .json(&reservation_body(term_end, term_end + HOUR, &[]))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("outside the bookable term"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn missing_session_is_unauthorized_but_search_is_public(pool: PgPool) {
        let server = create_test_server(pool.clone());

        let reservation = server
            .post("/api/livestream/reservation")
            .json(&reservation_body(0, HOUR, &[]))
            .await;
        reservation.assert_status(StatusCode::UNAUTHORIZED);

        let mine = server.get("/api/livestream/me").await;
        mine.assert_status(StatusCode::UNAUTHORIZED);

        let search = server.get("/api/livestream/search").await;
        search.assert_status(StatusCode::OK);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn search_filters_by_tag_and_orders_newest_first(pool: PgPool) {
        let config = create_test_config();
        let t0 = config.term.start_unix();
        let alice = create_test_user(&pool, "alice").await;
        let token = create_test_session(&pool, alice).await;
        let music = create_test_tag(&pool, "music").await;
        let talk = create_test_tag(&pool, "talk").await;
        seed_hourly_slots(&pool, t0, 4, 2).await;

        let server = create_test_server(pool.clone());

        let mut music_ids = Vec::new();
        for i in 0..3 {
            let start = t0 + i * HOUR;
            let tags: &[i64] = if i == 1 { &[talk] } else { &[music] };
            let created = server
                .post("/api/livestream/reservation")
                .authorization_bearer(&token.to_string())
                .json(&reservation_body(start, start + HOUR, tags))
                .await;
            created.assert_status(StatusCode::CREATED);
            let livestream: LivestreamResponse = created.json();
            if i != 1 {
                music_ids.push(livestream.id);
            }
        }

        let found = server.get("/api/livestream/search").add_query_param("tag", "music").await;
        found.assert_status(StatusCode::OK);
        let found: Vec<LivestreamResponse> = found.json();
        let found_ids: Vec<i64> = found.iter().map(|l| l.id).collect();
        music_ids.reverse();
        assert_eq!(found_ids, music_ids);

        let limited = server.get("/api/livestream/search").add_query_param("limit", 1).await;
        limited.assert_status(StatusCode::OK);
        let limited: Vec<LivestreamResponse> = limited.json();
        assert_eq!(limited.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unknown_livestream_and_username_are_not_found(pool: PgPool) {
        let alice = create_test_user(&pool, "alice").await;
        let token = create_test_session(&pool, alice).await;

        let server = create_test_server(pool.clone());

        let missing = server.get("/api/livestream/12345").authorization_bearer(&token.to_string()).await;
        missing.assert_status(StatusCode::NOT_FOUND);

        let missing_user = server
            .get("/api/user/nobody/livestream")
            .authorization_bearer(&token.to_string())
            .await;
        missing_user.assert_status(StatusCode::NOT_FOUND);

        let known_user = server
            .get("/api/user/alice/livestream")
            .authorization_bearer(&token.to_string())
            .await;
        known_user.assert_status(StatusCode::OK);
        let listed: Vec<LivestreamResponse> = known_user.json();
        assert!(listed.is_empty());
    }
}
