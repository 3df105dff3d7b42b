//! Database layer for data persistence and access.
//!
//! Implements the data access layer using SQLx with PostgreSQL, following the
//! repository pattern: API handlers open a connection or transaction, hand it
//! to a repository from [`handlers`], and get back domain models from
//! [`models`].
//!
//! All shared mutable state (slot capacity, livestream records) lives in
//! PostgreSQL and is only mutated inside a transaction. Concurrency control
//! for bookings is row-level pessimistic locking on slot rows, so correctness
//! holds across multiple server processes sharing one database - an
//! in-process mutex would not survive horizontal scaling.
//!
//! Migrations live in `migrations/` and are exposed via [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
