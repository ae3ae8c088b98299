// --- File: crates/viewty_scheduling/src/service.rs ---
//! Booking lifecycle engine.
//!
//! Turns a user-selected slot into a persisted visit and implements the
//! cancel-then-create reschedule protocol on top of the [`VisitStore`]
//! abstraction.

use crate::logic::{
    generate_time_slots, validate_booking_request, BookVisitRequest, SchedulingError, TimeSlot,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use viewty_common::{NewVisit, Visit, VisitStatus, VisitStore};
use viewty_config::SchedulingConfig;

/// Cancellation reason stamped on the old visit by a reschedule.
pub const RESCHEDULE_REASON: &str = "Rescheduled";

/// Booking lifecycle engine over an injected visit store.
pub struct BookingService {
    store: Arc<dyn VisitStore>,
    config: SchedulingConfig,
}

impl BookingService {
    pub fn new(store: Arc<dyn VisitStore>, config: SchedulingConfig) -> Self {
        Self { store, config }
    }

    /// Derives the slot grid for one agent and date.
    ///
    /// Reads availability, blocked dates, and active visits from the store,
    /// then delegates to the pure generator. A date with no usable
    /// availability yields an empty list, never an error.
    pub async fn available_slots(
        &self,
        agent_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let availability = self.store.list_availability(agent_id).await?;
        let blocked_dates = self.store.list_blocked_dates(agent_id).await?;
        let existing_visits = self.store.list_active_visits(agent_id, date).await?;

        debug!(
            agent_id,
            %date,
            windows = availability.len(),
            active_visits = existing_visits.len(),
            "Deriving slot grid"
        );

        Ok(generate_time_slots(
            &availability,
            date,
            &existing_visits,
            &blocked_dates,
            self.config.slot_duration(),
        ))
    }

    /// Books a visit in status `pending`.
    ///
    /// The slot is trusted to have come from [`Self::available_slots`] for
    /// the same agent and date, but a conflicting active visit that appeared
    /// between read and write is still caught: first by the advisory re-check
    /// here, and as a hard backstop by the store's uniqueness constraint on
    /// `(agent_id, visit_date, start_time)` for active statuses.
    pub async fn book_visit(&self, request: BookVisitRequest) -> Result<Visit, SchedulingError> {
        validate_booking_request(&request)?;

        let active = self
            .store
            .list_active_visits(&request.agent_id, request.visit_date)
            .await?;
        if active
            .iter()
            .any(|visit| visit.overlaps(request.start_time, request.end_time))
        {
            warn!(
                agent_id = %request.agent_id,
                visit_date = %request.visit_date,
                start_time = %request.start_time,
                "Advisory conflict check failed"
            );
            return Err(SchedulingError::SlotConflict);
        }

        let visit = self
            .store
            .insert_visit(NewVisit {
                property_id: request.property_id,
                agent_id: request.agent_id,
                visit_date: request.visit_date,
                start_time: request.start_time,
                end_time: request.end_time,
                visitor_name: request.visitor_name,
                visitor_phone: request.visitor_phone,
                visitor_email: request.visitor_email,
                notes: request.notes,
            })
            .await?;

        info!(visit_id = %visit.id, agent_id = %visit.agent_id, "Visit booked");
        Ok(visit)
    }

    /// Cancels a visit. Cancelled is terminal, so cancelling twice is an
    /// input error rather than an idempotent no-op.
    pub async fn cancel_visit(
        &self,
        visit_id: &str,
        reason: Option<String>,
    ) -> Result<Visit, SchedulingError> {
        let existing = self
            .store
            .find_visit(visit_id)
            .await?
            .ok_or_else(|| SchedulingError::NotFound(visit_id.to_string()))?;

        if existing.status == VisitStatus::Cancelled {
            return Err(SchedulingError::InvalidInput(format!(
                "visit {visit_id} is already cancelled"
            )));
        }

        let cancelled_at = Utc::now();
        let reason = reason.unwrap_or_else(|| "Cancelled by visitor".to_string());
        self.store
            .update_visit_status(
                visit_id,
                VisitStatus::Cancelled,
                Some(cancelled_at),
                Some(reason.clone()),
            )
            .await?;

        info!(visit_id, %reason, "Visit cancelled");
        Ok(Visit {
            status: VisitStatus::Cancelled,
            cancelled_at: Some(cancelled_at),
            cancellation_reason: Some(reason),
            updated_at: cancelled_at,
            ..existing
        })
    }

    /// Reschedules a visit: cancel the old record, then book the new slot.
    ///
    /// Step ordering is strict. If the cancellation fails for any reason the
    /// whole operation aborts as [`SchedulingError::RescheduleFailed`] and no
    /// new visit exists. If the creation fails after a successful
    /// cancellation, the old visit stays cancelled and the creation error
    /// propagates as-is so the caller can retry step 2 alone.
    pub async fn reschedule_visit(
        &self,
        existing_visit_id: &str,
        new_slot: BookVisitRequest,
    ) -> Result<Visit, SchedulingError> {
        self.cancel_visit(existing_visit_id, Some(RESCHEDULE_REASON.to_string()))
            .await
            .map_err(|err| SchedulingError::RescheduleFailed(err.to_string()))?;

        self.book_visit(new_slot).await
    }

    /// Admin listing of visits for one agent and date.
    pub async fn list_visits(
        &self,
        agent_id: &str,
        date: NaiveDate,
        include_cancelled: bool,
    ) -> Result<Vec<Visit>, SchedulingError> {
        Ok(self
            .store
            .list_visits(agent_id, date, include_cancelled)
            .await?)
    }
}
