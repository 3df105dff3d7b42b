//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: axum route handlers for all endpoints
//! - **[`models`]**: request/response data structures
//!
//! Endpoints are documented with OpenAPI annotations via `utoipa`; the
//! aggregate document is served at `/api-docs/openapi.json`.

pub mod handlers;
pub mod models;
