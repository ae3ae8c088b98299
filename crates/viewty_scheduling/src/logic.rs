// --- File: crates/viewty_scheduling/src/logic.rs ---
//! Slot derivation: turns weekly availability windows into a concrete slot
//! grid for one calendar date.
//!
//! Everything in this module is pure. All date/time values are naive
//! agent-local times; no clock or timezone database is consulted.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use viewty_common::{AvailabilityWindow, HttpStatusCode, StoreError, Visit};

// --- Error Handling ---
use thiserror::Error;

/// Domain errors of the booking lifecycle engine.
///
/// The slot generator itself never raises these; a date with no usable
/// availability simply yields an empty grid.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Requested time slot is no longer available")]
    SlotConflict,
    #[error("Visit not found: {0}")]
    NotFound(String),
    #[error("Store failure: {0}")]
    Persistence(String),
    /// The cancellation half of a reschedule failed; the new booking is
    /// guaranteed not to exist and the original visit keeps its status.
    #[error("Reschedule aborted before creating a new visit: {0}")]
    RescheduleFailed(String),
}

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => SchedulingError::SlotConflict,
            StoreError::NotFound => SchedulingError::NotFound("visit".to_string()),
            StoreError::Backend(message) => SchedulingError::Persistence(message),
        }
    }
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::InvalidInput(_) => 400,
            SchedulingError::NotFound(_) => 404,
            SchedulingError::SlotConflict => 409,
            SchedulingError::Persistence(_) => 500,
            SchedulingError::RescheduleFailed(_) => 502,
        }
    }
}

// --- Data Structures ---

/// A fixed-duration candidate appointment interval, derived fresh on every
/// query and never persisted.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    #[cfg_attr(feature = "openapi", schema(example = "10:00:00"))]
    pub start_time: NaiveTime,
    #[cfg_attr(feature = "openapi", schema(example = "10:30:00"))]
    pub end_time: NaiveTime,
    pub available: bool,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// Agent whose calendar is being queried
    pub agent_id: String,
    /// Target date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-09-07"))]
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeSlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Payload for booking a visit. The caller has already picked the slot from
/// the generator's output for the same agent and date.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookVisitRequest {
    pub property_id: String,
    pub agent_id: String,
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-09-07"))]
    pub visit_date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(example = "10:00:00"))]
    pub start_time: NaiveTime,
    #[cfg_attr(feature = "openapi", schema(example = "10:30:00"))]
    pub end_time: NaiveTime,
    pub visitor_name: Option<String>,
    pub visitor_phone: Option<String>,
    pub visitor_email: Option<String>,
    pub notes: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct CancelVisitQuery {
    pub reason: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct CancellationResponse {
    pub success: bool,
    pub visit_id: String,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct VisitsQuery {
    pub agent_id: String,
    /// Target date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-09-07"))]
    pub date: String,
    /// Whether to include cancelled visits
    pub include_cancelled: Option<bool>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VisitsResponse {
    pub visits: Vec<Visit>,
}

// --- Slot Derivation ---

/// Weekday index of a date using the 0=Sunday..6=Saturday convention that
/// `AvailabilityWindow.day_of_week` follows.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Cuts the availability windows matching `date`'s weekday into consecutive
/// fixed-duration slots and flags each one against the existing visits.
///
/// Policy, in order:
/// - a blocked date yields no slots at all, even if stale windows exist;
/// - windows whose weekday does not match are ignored;
/// - malformed windows (`end_time <= start_time`) yield no slots;
/// - slots start at `window.start_time` and repeat back-to-back; a trailing
///   remainder shorter than `slot_duration` is dropped, not truncated;
/// - a slot is unavailable when its half-open interval intersects a
///   `pending` or `confirmed` visit on that date; back-to-back intervals do
///   not intersect, and `cancelled` visits never block;
/// - the result is sorted ascending by start time across all windows.
///   Overlapping windows may produce duplicate slots; deduplication is the
///   configuration's responsibility.
pub fn generate_time_slots(
    availability: &[AvailabilityWindow],
    date: NaiveDate,
    existing_visits: &[Visit],
    blocked_dates: &[NaiveDate],
    slot_duration: Duration,
) -> Vec<TimeSlot> {
    if slot_duration <= Duration::zero() {
        return Vec::new();
    }
    if blocked_dates.contains(&date) {
        return Vec::new();
    }

    let weekday = weekday_index(date);
    let mut slots = Vec::new();

    for window in availability.iter().filter(|w| w.day_of_week == weekday) {
        if window.end_time <= window.start_time {
            continue;
        }
        let mut start = window.start_time;
        loop {
            let (end, wrapped) = start.overflowing_add_signed(slot_duration);
            if wrapped != 0 || end > window.end_time {
                break;
            }
            let available = !existing_visits.iter().any(|visit| {
                visit.visit_date == date && visit.status.is_active() && visit.overlaps(start, end)
            });
            slots.push(TimeSlot {
                start_time: start,
                end_time: end,
                available,
            });
            start = end;
        }
    }

    // Stable, so equal start times keep window order
    slots.sort_by_key(|slot| slot.start_time);
    slots
}

// --- Date-Picker Bound ---

/// Rejects dates a date picker must not offer: anything before `today` or
/// beyond the configured booking horizon. Called before the generator ever
/// runs; `today` is passed in explicitly to keep this checkable in tests.
pub fn validate_bookable_date(
    date: NaiveDate,
    today: NaiveDate,
    horizon_days: u16,
) -> Result<(), SchedulingError> {
    if date < today {
        return Err(SchedulingError::InvalidInput(format!(
            "date {date} is in the past"
        )));
    }
    let horizon_end = today + Duration::days(i64::from(horizon_days));
    if date > horizon_end {
        return Err(SchedulingError::InvalidInput(format!(
            "date {date} is beyond the booking horizon ({horizon_end})"
        )));
    }
    Ok(())
}

/// Validates the fields of a booking request that the engine refuses to
/// trust: mandatory identifiers and interval sanity.
pub fn validate_booking_request(request: &BookVisitRequest) -> Result<(), SchedulingError> {
    if request.agent_id.trim().is_empty() {
        return Err(SchedulingError::InvalidInput(
            "agent_id must not be empty".to_string(),
        ));
    }
    if request.property_id.trim().is_empty() {
        return Err(SchedulingError::InvalidInput(
            "property_id must not be empty".to_string(),
        ));
    }
    if request.end_time <= request.start_time {
        return Err(SchedulingError::InvalidInput(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}
