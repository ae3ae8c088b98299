// File: crates/viewty_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    BookVisitRequest, CancelVisitQuery, CancellationResponse, SlotsQuery, TimeSlot,
    TimeSlotsResponse, VisitsQuery, VisitsResponse,
};
use viewty_common::models::{Visit, VisitStatus};

#[utoipa::path(
    get,
    path = "/visits/slots",
    params(
        ("agent_id" = String, Query, description = "Agent whose calendar is queried"),
        ("date" = String, Query, description = "Target date in YYYY-MM-DD format", example = "2026-09-07", format = "date")
    ),
    responses(
        (status = 200, description = "Slot grid for the requested date", body = TimeSlotsResponse,
         example = json!({
             "date": "2026-09-07",
             "slots": [
                 { "start_time": "09:00:00", "end_time": "09:30:00", "available": true },
                 { "start_time": "09:30:00", "end_time": "10:00:00", "available": false }
             ]
         })
        ),
        (status = 400, description = "Invalid date or outside booking horizon", body = String),
        (status = 500, description = "Internal error", body = String)
    )
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    post,
    path = "/visits/book",
    request_body(content = BookVisitRequest, example = json!({
        "property_id": "prop-42",
        "agent_id": "agent-7",
        "visit_date": "2026-09-07",
        "start_time": "10:00:00",
        "end_time": "10:30:00",
        "visitor_name": "Ada Lovelace",
        "visitor_email": "ada@example.com"
    })),
    responses(
        (status = 200, description = "Created visit in status pending", body = Visit),
        (status = 409, description = "Slot no longer available",
         example = json!("Requested time slot is no longer available")
        ),
        (status = 500, description = "Booking failed")
    )
)]
fn doc_book_visit_handler() {}

#[utoipa::path(
    post,
    path = "/visits/{visit_id}/reschedule",
    params(
        ("visit_id" = String, Path, description = "The ID of the visit to reschedule")
    ),
    request_body = BookVisitRequest,
    responses(
        (status = 200, description = "Replacement visit in status pending", body = Visit),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "New slot no longer available; the old visit is already cancelled"),
        (status = 502, description = "Cancellation failed; no new visit was created")
    )
)]
fn doc_reschedule_visit_handler() {}

#[utoipa::path(
    patch,
    path = "/visits/{visit_id}/cancel",
    params(
        ("visit_id" = String, Path, description = "The ID of the visit to cancel"),
        ("reason" = Option<String>, Query, description = "Cancellation reason")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse,
         example = json!({
             "success": true,
             "visit_id": "2f40c9d8-8a3e-4a7e-b68f-0f70f4f7f3aa",
             "message": "Visit cancelled successfully."
         })
        ),
        (status = 400, description = "Visit already cancelled"),
        (status = 404, description = "Visit not found")
    )
)]
fn doc_cancel_visit_handler() {}

#[utoipa::path(
    get,
    path = "/admin/visits",
    params(
        ("agent_id" = String, Query, description = "Agent whose visits are listed"),
        ("date" = String, Query, description = "Target date in YYYY-MM-DD format", example = "2026-09-07", format = "date"),
        ("include_cancelled" = bool, Query, description = "Whether to include cancelled visits", example = false)
    ),
    responses(
        (status = 200, description = "Visits for the agent and date", body = VisitsResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Failed to fetch visits")
    )
)]
fn doc_list_visits_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_slots_handler,
        doc_book_visit_handler,
        doc_reschedule_visit_handler,
        doc_cancel_visit_handler,
        doc_list_visits_handler
    ),
    components(
        schemas(
            SlotsQuery,
            TimeSlot,
            TimeSlotsResponse,
            BookVisitRequest,
            CancelVisitQuery,
            CancellationResponse,
            VisitsQuery,
            VisitsResponse,
            Visit,
            VisitStatus
        )
    ),
    tags(
        (name = "Visits", description = "Property-viewing appointment API")
    ),
    servers(
        (url = "/api", description = "Viewty API server")
    )
)]
pub struct SchedulingApiDoc;
