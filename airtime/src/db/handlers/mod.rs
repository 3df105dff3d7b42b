//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed operations for one concern, and returns domain models from
//! [`crate::db::models`]. Repositories created from a transaction share its
//! ACID guarantees; [`Bookings`] additionally opens its own transaction so a
//! whole booking commits or rolls back as one unit.
//!
//! - [`ReservationSlots`]: slot inventory (locked checks and consumption)
//! - [`Bookings`]: the booking transaction
//! - [`Livestreams`]: stored livestream records and tag links
//! - [`LivestreamComposer`]: read-model composition, single and batched
//! - [`Users`]: identity store collaborator
//! - [`Tags`]: tag catalog collaborator

pub mod bookings;
pub mod compose;
pub mod livestreams;
pub mod reservation_slots;
pub mod tags;
pub mod users;

pub use bookings::Bookings;
pub use compose::LivestreamComposer;
pub use livestreams::Livestreams;
pub use reservation_slots::ReservationSlots;
pub use tags::Tags;
pub use users::Users;
