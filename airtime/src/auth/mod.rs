//! Session-based request authentication.

pub mod current_user;
pub mod sessions;
