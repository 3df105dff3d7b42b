//! Test utilities: seeding helpers for the externally-owned tables and a
//! ready-made test server.

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::types::{TagId, UserId};

pub fn create_test_config() -> Config {
    Config::default()
}

pub fn create_test_server(pool: PgPool) -> axum_test::TestServer {
    let state = crate::AppState {
        db: pool,
        config: create_test_config(),
    };
    axum_test::TestServer::new(crate::build_router(state)).expect("Failed to create test server")
}

/// Insert a user with a theme and an uploaded icon.
pub async fn create_test_user(pool: &PgPool, name: &str) -> UserId {
    let id = create_test_user_without_icon(pool, name).await;
    sqlx::query("INSERT INTO icons (user_id, image) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("icon-bytes-{name}").into_bytes())
        .execute(pool)
        .await
        .expect("Failed to insert test icon");
    id
}

/// Insert a user with a theme but no icon row, so identity composition falls
/// back to the configured fallback image.
pub async fn create_test_user_without_icon(pool: &PgPool, name: &str) -> UserId {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO users (name, display_name, description) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(format!("{name} on air"))
        .bind(format!("{name}'s channel"))
        .fetch_one(pool)
        .await
        .expect("Failed to insert test user");

    sqlx::query("INSERT INTO themes (user_id, dark_mode) VALUES ($1, FALSE)")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to insert test theme");

    id
}

pub async fn create_test_session(pool: &PgPool, user_id: UserId) -> Uuid {
    let token = Uuid::new_v4();
    sqlx::query("INSERT INTO user_sessions (token, user_id, expires_at) VALUES ($1, $2, now() + interval '1 hour')")
        .bind(token)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to insert test session");
    token
}

pub async fn expire_test_session(pool: &PgPool, token: Uuid) {
    sqlx::query("UPDATE user_sessions SET expires_at = now() - interval '1 hour' WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await
        .expect("Failed to expire test session");
}

pub async fn create_test_tag(pool: &PgPool, name: &str) -> TagId {
    sqlx::query_scalar::<_, i64>("INSERT INTO tags (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test tag")
}

/// Seed `hours` consecutive hour buckets starting at `from`, each with the
/// given capacity.
pub async fn seed_hourly_slots(pool: &PgPool, from: i64, hours: i64, capacity: i64) {
    for i in 0..hours {
        sqlx::query("INSERT INTO reservation_slots (slot, start_at, end_at) VALUES ($1, $2, $3)")
            .bind(capacity)
            .bind(from + i * 3600)
            .bind(from + (i + 1) * 3600)
            .execute(pool)
            .await
            .expect("Failed to seed reservation slot");
    }
}
