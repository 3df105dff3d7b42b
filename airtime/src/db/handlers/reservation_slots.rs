//! Slot inventory: locked availability checks and capacity consumption.

use sqlx::PgConnection;
use tracing::{debug, instrument};

use crate::config::ReservationTerm;
use crate::db::errors::{DbError, Result};
use crate::db::models::reservation_slots::ReservationSlot;

pub struct ReservationSlots<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ReservationSlots<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Validate the requested window and consume one unit of capacity from
    /// every slot bucket it covers, or fail without touching anything.
    ///
    /// Must run inside the transaction that also persists the livestream row:
    /// the covered slot rows are locked `FOR UPDATE` (in `start_at` order, so
    /// concurrent overlapping requests cannot deadlock on lock order) and stay
    /// locked until that transaction commits or rolls back. If any covered
    /// slot is at zero the whole operation is rejected; partial consumption
    /// never happens.
    ///
    /// A window matching zero slot rows is admitted as-is: there are no rows
    /// to fail the check. Inventory coverage of the term is the seeder's
    /// responsibility.
    #[instrument(skip(self, term), err)]
    pub async fn check_and_consume(&mut self, start_at: i64, end_at: i64, term: &ReservationTerm) -> Result<()> {
        if start_at >= end_at {
            return Err(DbError::InvalidTimeRange { start_at, end_at });
        }
        if !term.admits(start_at, end_at) {
            return Err(DbError::OutOfTerm {
                start_at,
                end_at,
                term_start: term.start_unix(),
                term_end: term.end_unix(),
            });
        }

        let slots = sqlx::query_as::<_, ReservationSlot>(
            r#"
            SELECT id, slot, start_at, end_at
            FROM reservation_slots
            WHERE start_at >= $1 AND end_at <= $2
            ORDER BY start_at
            FOR UPDATE
            "#,
        )
        .bind(start_at)
        .bind(end_at)
        .fetch_all(&mut *self.db)
        .await?;

        for slot in &slots {
            debug!(slot_start = slot.start_at, slot_end = slot.end_at, remaining = slot.slot, "checking slot");
            if slot.slot < 1 {
                return Err(DbError::CapacityExhausted {
                    start_at,
                    end_at,
                    term_start: term.start_unix(),
                    term_end: term.end_unix(),
                });
            }
        }

        let updated = sqlx::query("UPDATE reservation_slots SET slot = slot - 1 WHERE start_at >= $1 AND end_at <= $2")
            .bind(start_at)
            .bind(end_at)
            .execute(&mut *self.db)
            .await?
            .rows_affected();

        if updated != slots.len() as u64 {
            return Err(DbError::Other(anyhow::anyhow!(
                "slot decrement touched {updated} rows, expected {}",
                slots.len()
            )));
        }

        Ok(())
    }

    /// Remaining capacity per covered bucket, in `start_at` order.
    #[instrument(skip(self), err)]
    pub async fn remaining_in_range(&mut self, start_at: i64, end_at: i64) -> Result<Vec<ReservationSlot>> {
        let slots = sqlx::query_as::<_, ReservationSlot>(
            "SELECT id, slot, start_at, end_at FROM reservation_slots WHERE start_at >= $1 AND end_at <= $2 ORDER BY start_at",
        )
        .bind(start_at)
        .bind(end_at)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(slots)
    }
}
