// --- File: crates/viewty_scheduling/src/routes.rs ---

use crate::handlers::{
    book_visit_handler, cancel_visit_handler, get_slots_handler, list_visits_handler,
    reschedule_visit_handler, SchedulingState,
};
use axum::{
    routing::{get, patch, post},
    Router,
};

use std::sync::Arc;
use viewty_common::VisitStore;
use viewty_config::AppConfig;

/// Creates a router containing all routes for the visit-scheduling feature.
/// The visit store is injected so tests can run against an in-memory one.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn VisitStore>) -> Router {
    let state = Arc::new(SchedulingState { config, store });

    Router::new()
        .route("/visits/slots", get(get_slots_handler))
        .route("/visits/book", post(book_visit_handler))
        .route(
            "/visits/{visit_id}/reschedule",
            post(reschedule_visit_handler),
        )
        .route("/visits/{visit_id}/cancel", patch(cancel_visit_handler))
        .route("/admin/visits", get(list_visits_handler))
        .with_state(state)
}
