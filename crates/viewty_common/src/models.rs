// --- File: crates/viewty_common/src/models.rs ---
//! Domain models shared between the scheduling core and the store backends.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A recurring weekly time range during which an agent accepts visits.
///
/// `day_of_week` uses the 0=Sunday..6=Saturday convention. An agent may own
/// several windows for the same weekday (e.g. a morning and an afternoon
/// block).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub agent_id: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Lifecycle state of a visit.
///
/// `Cancelled` is terminal; there is no transition out of it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl VisitStatus {
    /// The string form used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Pending => "pending",
            VisitStatus::Confirmed => "confirmed",
            VisitStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VisitStatus::Pending),
            "confirmed" => Some(VisitStatus::Confirmed),
            "cancelled" => Some(VisitStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a visit in this status occupies its slot.
    pub fn is_active(&self) -> bool {
        matches!(self, VisitStatus::Pending | VisitStatus::Confirmed)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted viewing appointment between a visitor and an agent.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub property_id: String,
    pub agent_id: String,
    pub visit_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub visitor_name: Option<String>,
    pub visitor_phone: Option<String>,
    pub visitor_email: Option<String>,
    pub notes: Option<String>,
    pub status: VisitStatus,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visit {
    /// Half-open interval intersection against another time range on the
    /// same date. Back-to-back ranges do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && start < self.end_time
    }
}

/// Fields for a visit insert; id, status, and timestamps are assigned by the
/// store.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub property_id: String,
    pub agent_id: String,
    pub visit_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub visitor_name: Option<String>,
    pub visitor_phone: Option<String>,
    pub visitor_email: Option<String>,
    pub notes: Option<String>,
}
