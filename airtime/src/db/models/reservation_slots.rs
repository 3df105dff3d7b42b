use sqlx::FromRow;

use crate::types::ReservationSlotId;

/// Remaining capacity for one fixed-width time bucket. Rows are seeded by the
/// operator; `slot` only ever decreases.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationSlot {
    pub id: ReservationSlotId,
    pub slot: i64,
    pub start_at: i64,
    pub end_at: i64,
}
