//! Database record structures matching table schemas.

pub mod livestreams;
pub mod reservation_slots;
pub mod tags;
pub mod users;
