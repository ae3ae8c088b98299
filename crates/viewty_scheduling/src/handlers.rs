// File: crates/viewty_scheduling/src/handlers.rs
use crate::logic::{
    validate_bookable_date, BookVisitRequest, CancelVisitQuery, CancellationResponse,
    SchedulingError, SlotsQuery, TimeSlotsResponse, VisitsQuery, VisitsResponse,
};
use crate::service::BookingService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use viewty_common::{HttpStatusCode, Visit, VisitStore};
use viewty_config::AppConfig;

// Define shared state needed by scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn VisitStore>, // Share the injected visit store
}

impl SchedulingState {
    fn service(&self) -> BookingService {
        BookingService::new(self.store.clone(), self.config.scheduling.clone())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, (StatusCode, String)> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })
}

fn error_response(err: SchedulingError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

/// Handler to get the slot grid for one agent and date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/visits/slots", // Path relative to /api
    params(SlotsQuery),
    responses(
        (status = 200, description = "Slot grid for the requested date", body = TimeSlotsResponse),
        (status = 400, description = "Bad request (invalid date, outside booking horizon)"),
        (status = 500, description = "Internal error")
    ),
    tag = "Visits"
))]
pub async fn get_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<TimeSlotsResponse>, (StatusCode, String)> {
    let date = parse_date(&query.date)?;

    // Date-picker bound: the generator itself never enforces this
    let today = Utc::now().date_naive();
    validate_bookable_date(date, today, state.config.scheduling.booking_horizon_days)
        .map_err(error_response)?;

    let slots = state
        .service()
        .available_slots(&query.agent_id, date)
        .await
        .map_err(error_response)?;

    Ok(Json(TimeSlotsResponse { date, slots }))
}

/// Handler to book a time slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/visits/book",
    request_body = BookVisitRequest,
    responses(
        (status = 200, description = "Created visit in status pending", body = Visit),
        (status = 400, description = "Bad request (missing identifiers, inverted interval)"),
        (status = 409, description = "Slot no longer available"),
        (status = 500, description = "Booking failed")
    ),
    tag = "Visits"
))]
pub async fn book_visit_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookVisitRequest>,
) -> Result<Json<Visit>, (StatusCode, String)> {
    let visit = state
        .service()
        .book_visit(payload)
        .await
        .map_err(error_response)?;

    info!(visit_id = %visit.id, "Successfully booked visit");
    Ok(Json(visit))
}

/// Handler to reschedule a visit: cancels the old record, books the new slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/visits/{visit_id}/reschedule",
    params(("visit_id" = String, Path, description = "Visit to reschedule")),
    request_body = BookVisitRequest,
    responses(
        (status = 200, description = "Replacement visit in status pending", body = Visit),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "New slot no longer available; the old visit is already cancelled"),
        (status = 502, description = "Cancellation failed; no new visit was created")
    ),
    tag = "Visits"
))]
pub async fn reschedule_visit_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(visit_id): Path<String>,
    Json(payload): Json<BookVisitRequest>,
) -> Result<Json<Visit>, (StatusCode, String)> {
    let visit = state
        .service()
        .reschedule_visit(&visit_id, payload)
        .await
        .map_err(error_response)?;

    info!(old_visit_id = %visit_id, new_visit_id = %visit.id, "Visit rescheduled");
    Ok(Json(visit))
}

/// Handler to cancel a visit without deleting it.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/visits/{visit_id}/cancel",
    params(
        ("visit_id" = String, Path, description = "Visit to cancel"),
        ("reason" = Option<String>, Query, description = "Cancellation reason")
    ),
    responses(
        (status = 200, description = "Cancellation acknowledged", body = CancellationResponse),
        (status = 400, description = "Visit already cancelled"),
        (status = 404, description = "Visit not found")
    ),
    tag = "Visits"
))]
pub async fn cancel_visit_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(visit_id): Path<String>,
    Query(params): Query<CancelVisitQuery>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    let visit = state
        .service()
        .cancel_visit(&visit_id, params.reason)
        .await
        .map_err(error_response)?;

    Ok(Json(CancellationResponse {
        success: true,
        visit_id: visit.id,
        message: "Visit cancelled successfully.".to_string(),
    }))
}

/// Handler to list visits for one agent and date (admin view).
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/visits",
    params(VisitsQuery),
    responses(
        (status = 200, description = "Visits for the agent and date", body = VisitsResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")
    ),
    tag = "Visits"
))]
pub async fn list_visits_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<VisitsQuery>,
) -> Result<Json<VisitsResponse>, (StatusCode, String)> {
    let date = parse_date(&query.date)?;
    let include_cancelled = query.include_cancelled.unwrap_or(false);

    let visits = state
        .service()
        .list_visits(&query.agent_id, date, include_cancelled)
        .await
        .map_err(error_response)?;

    Ok(Json(VisitsResponse { visits }))
}
