// --- File: crates/viewty_common/src/services.rs ---
//! Store abstractions for the scheduling core.
//!
//! The trait here decouples the booking engine from the concrete persistence
//! backend, allowing dependency injection and in-memory stores in tests.

use crate::models::{AvailabilityWindow, NewVisit, Visit, VisitStatus};
use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Contract error of the visit store.
///
/// Backends translate their own failures into these variants so the engine
/// can tell a uniqueness violation apart from an infrastructural failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An active visit already occupies the targeted slot (unique constraint).
    #[error("conflicting active visit for the requested slot")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A trait for visit store operations.
///
/// Every method is a blocking I/O operation against the external store; the
/// slot generator itself never goes through this trait.
pub trait VisitStore: Send + Sync {
    /// Weekly availability windows owned by an agent.
    fn list_availability(&self, agent_id: &str)
        -> BoxFuture<'_, Vec<AvailabilityWindow>, StoreError>;

    /// Calendar dates on which the agent accepts no visits at all.
    fn list_blocked_dates(&self, agent_id: &str) -> BoxFuture<'_, Vec<NaiveDate>, StoreError>;

    /// Visits for one agent and date, filtered to `pending`/`confirmed`.
    fn list_active_visits(
        &self,
        agent_id: &str,
        visit_date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Visit>, StoreError>;

    /// Visits for one agent and date, optionally including cancelled ones.
    fn list_visits(
        &self,
        agent_id: &str,
        visit_date: NaiveDate,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Visit>, StoreError>;

    /// Look a visit up by id, any status.
    fn find_visit(&self, visit_id: &str) -> BoxFuture<'_, Option<Visit>, StoreError>;

    /// Insert a new visit in status `pending` and return the stored record.
    fn insert_visit(&self, visit: NewVisit) -> BoxFuture<'_, Visit, StoreError>;

    /// Transition a visit's status, stamping cancellation metadata when the
    /// target status is `cancelled`.
    fn update_visit_status(
        &self,
        visit_id: &str,
        status: VisitStatus,
        cancelled_at: Option<DateTime<Utc>>,
        cancellation_reason: Option<String>,
    ) -> BoxFuture<'_, (), StoreError>;
}
