//! Booking coordinator: validation, capacity consumption, record creation and
//! tag linking as one atomic unit.

use sqlx::{Connection, PgConnection};
use tracing::instrument;

use crate::api::models::livestreams::LivestreamResponse;
use crate::config::Config;
use crate::db::errors::Result;
use crate::db::handlers::compose::LivestreamComposer;
use crate::db::handlers::livestreams::Livestreams;
use crate::db::handlers::reservation_slots::ReservationSlots;
use crate::db::models::livestreams::LivestreamCreateDBRequest;
use crate::types::UserId;

pub struct Bookings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bookings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Book a livestream: validate the window, consume one unit of capacity
    /// from every covered slot, persist the record and its tag links, and
    /// compose the full read model - all in one transaction.
    ///
    /// Any failure rolls the whole transaction back: no orphan record, no
    /// partial tag set, no partial slot decrement survives a failed booking.
    /// Overlapping bookings serialize on the slot row locks; disjoint windows
    /// run fully in parallel.
    #[instrument(
        skip(self, request, config),
        fields(start_at = request.start_at, end_at = request.end_at, tags = request.tag_ids.len()),
        err
    )]
    pub async fn reserve(&mut self, owner_id: UserId, request: &LivestreamCreateDBRequest, config: &Config) -> Result<LivestreamResponse> {
        let mut tx = self.db.begin().await?;

        ReservationSlots::new(&mut *tx)
            .check_and_consume(request.start_at, request.end_at, &config.term)
            .await?;

        let mut livestreams = Livestreams::new(&mut *tx);
        let record = livestreams.insert(owner_id, request).await?;
        livestreams.link_tags(record.id, &request.tag_ids).await?;

        let composed = LivestreamComposer::new(&mut *tx).compose_one(&record, config).await?;

        tx.commit().await?;

        Ok(composed)
    }
}
