//! Axum route handlers.

pub mod livestreams;
