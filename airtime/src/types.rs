//! Common type definitions.
//!
//! All entity ids are 64-bit integers assigned by the database (`BIGSERIAL`
//! columns), wrapped in type aliases for readability at call sites:
//!
//! - [`UserId`]: identity-store user identifier
//! - [`LivestreamId`]: livestream record identifier
//! - [`TagId`]: tag-catalog tag identifier
//! - [`ReservationSlotId`]: capacity slot row identifier

pub type UserId = i64;
pub type LivestreamId = i64;
pub type TagId = i64;
pub type ReservationSlotId = i64;
