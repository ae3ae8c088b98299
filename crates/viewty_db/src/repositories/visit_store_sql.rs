// --- File: crates/viewty_db/src/repositories/visit_store_sql.rs ---
//! SQL-backed implementation of the visit store.
//!
//! Dates and times are persisted as TEXT (`YYYY-MM-DD`, `HH:MM:SS`, RFC 3339
//! for timestamps) so rows stay readable in `sqlite3` and sort correctly with
//! plain string comparison.
//!
//! The schema carries a partial unique index over active visits, so a
//! double-booking race that slips past the advisory conflict check in the
//! engine still dies here with [`StoreError::Conflict`].

use crate::client::DbClient;
use crate::error::DbError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info, warn};
use uuid::Uuid;
use viewty_common::models::{AvailabilityWindow, NewVisit, Visit, VisitStatus};
use viewty_common::{BoxFuture, StoreError, VisitStore};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS availability_windows (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        agent_id TEXT NOT NULL,
        day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_availability_agent_day
        ON availability_windows (agent_id, day_of_week)",
    "CREATE TABLE IF NOT EXISTS blocked_dates (
        agent_id TEXT NOT NULL,
        blocked_date TEXT NOT NULL,
        PRIMARY KEY (agent_id, blocked_date)
    )",
    "CREATE TABLE IF NOT EXISTS visits (
        id TEXT PRIMARY KEY,
        property_id TEXT NOT NULL,
        agent_id TEXT NOT NULL,
        visit_date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        visitor_name TEXT,
        visitor_phone TEXT,
        visitor_email TEXT,
        notes TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        cancelled_at TEXT,
        cancellation_reason TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_visits_agent_date
        ON visits (agent_id, visit_date)",
    // Cancelled visits fall out of the index, which is what frees a slot
    // for re-booking after a cancellation.
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_visits_active_slot
        ON visits (agent_id, visit_date, start_time)
        WHERE status IN ('pending', 'confirmed')",
];

/// SQL-backed visit store
///
/// Holds a clone of the shared connection pool; the struct itself is cheap to
/// clone and safe to share across handlers.
#[derive(Debug, Clone)]
pub struct SqlVisitStore {
    pool: Pool<Sqlite>,
}

impl SqlVisitStore {
    pub fn new(client: &DbClient) -> Self {
        Self {
            pool: client.pool().clone(),
        }
    }

    /// Create the tables and indexes if they don't already exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;
        }
        info!("Visit store schema initialized");
        Ok(())
    }

    /// Add a weekly availability window for an agent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Validation`] for an empty agent id, a weekday
    /// outside 0..=6, or a window whose end does not come after its start.
    pub async fn add_availability_window(
        &self,
        window: AvailabilityWindow,
    ) -> Result<AvailabilityWindow, DbError> {
        if window.agent_id.trim().is_empty() {
            return Err(DbError::Validation("agent_id must not be empty".to_string()));
        }
        if window.day_of_week > 6 {
            return Err(DbError::Validation(format!(
                "day_of_week must be 0..=6 (0 = Sunday), got {}",
                window.day_of_week
            )));
        }
        if window.end_time <= window.start_time {
            return Err(DbError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO availability_windows (agent_id, day_of_week, start_time, end_time)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&window.agent_id)
        .bind(window.day_of_week as i64)
        .bind(window.start_time.format(TIME_FORMAT).to_string())
        .bind(window.end_time.format(TIME_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        debug!(
            agent_id = %window.agent_id,
            day_of_week = window.day_of_week,
            "Added availability window"
        );
        Ok(window)
    }

    /// Remove the windows matching an agent, weekday, and start time.
    ///
    /// Returns `true` if at least one row was deleted.
    pub async fn remove_availability_window(
        &self,
        agent_id: &str,
        day_of_week: u8,
        start_time: NaiveTime,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM availability_windows
             WHERE agent_id = ? AND day_of_week = ? AND start_time = ?",
        )
        .bind(agent_id)
        .bind(day_of_week as i64)
        .bind(start_time.format(TIME_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Block a whole calendar date for an agent. Blocking an already blocked
    /// date is a no-op.
    pub async fn block_date(&self, agent_id: &str, date: NaiveDate) -> Result<(), DbError> {
        sqlx::query("INSERT OR IGNORE INTO blocked_dates (agent_id, blocked_date) VALUES (?, ?)")
            .bind(agent_id)
            .bind(date.format(DATE_FORMAT).to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(())
    }

    /// Unblock a date. Returns `true` if the date was blocked before.
    pub async fn unblock_date(&self, agent_id: &str, date: NaiveDate) -> Result<bool, DbError> {
        let result =
            sqlx::query("DELETE FROM blocked_dates WHERE agent_id = ? AND blocked_date = ?")
                .bind(agent_id)
                .bind(date.format(DATE_FORMAT).to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DbError::CorruptRow(format!("bad date '{value}': {e}")))
}

fn parse_time(value: &str) -> Result<NaiveTime, DbError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| DbError::CorruptRow(format!("bad time '{value}': {e}")))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::CorruptRow(format!("bad timestamp '{value}': {e}")))
}

fn row_to_visit(row: &SqliteRow) -> Result<Visit, DbError> {
    let status_raw: String = row.try_get("status")?;
    let status = VisitStatus::parse(&status_raw)
        .ok_or_else(|| DbError::CorruptRow(format!("unknown status '{status_raw}'")))?;

    let cancelled_at: Option<String> = row.try_get("cancelled_at")?;
    let cancelled_at = cancelled_at.as_deref().map(parse_timestamp).transpose()?;

    let visit_date: String = row.try_get("visit_date")?;
    let start_time: String = row.try_get("start_time")?;
    let end_time: String = row.try_get("end_time")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Visit {
        id: row.try_get("id")?,
        property_id: row.try_get("property_id")?,
        agent_id: row.try_get("agent_id")?,
        visit_date: parse_date(&visit_date)?,
        start_time: parse_time(&start_time)?,
        end_time: parse_time(&end_time)?,
        visitor_name: row.try_get("visitor_name")?,
        visitor_phone: row.try_get("visitor_phone")?,
        visitor_email: row.try_get("visitor_email")?,
        notes: row.try_get("notes")?,
        status,
        cancelled_at,
        cancellation_reason: row.try_get("cancellation_reason")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Translate an insert failure, surfacing unique-index hits as conflicts.
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.message().contains("UNIQUE constraint failed") {
            return StoreError::Conflict;
        }
    }
    StoreError::Backend(err.to_string())
}

impl VisitStore for SqlVisitStore {
    fn list_availability(
        &self,
        agent_id: &str,
    ) -> BoxFuture<'_, Vec<AvailabilityWindow>, StoreError> {
        let pool = self.pool.clone();
        let agent_id = agent_id.to_string();
        Box::pin(async move {
            let rows = sqlx::query(
                "SELECT agent_id, day_of_week, start_time, end_time
                 FROM availability_windows
                 WHERE agent_id = ?
                 ORDER BY day_of_week, start_time",
            )
            .bind(&agent_id)
            .fetch_all(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

            let mut windows = Vec::with_capacity(rows.len());
            for row in &rows {
                let day_of_week: i64 = row.try_get("day_of_week").map_err(DbError::from)?;
                let start_time: String = row.try_get("start_time").map_err(DbError::from)?;
                let end_time: String = row.try_get("end_time").map_err(DbError::from)?;
                windows.push(AvailabilityWindow {
                    agent_id: row.try_get("agent_id").map_err(DbError::from)?,
                    day_of_week: day_of_week as u8,
                    start_time: parse_time(&start_time)?,
                    end_time: parse_time(&end_time)?,
                });
            }
            Ok(windows)
        })
    }

    fn list_blocked_dates(&self, agent_id: &str) -> BoxFuture<'_, Vec<NaiveDate>, StoreError> {
        let pool = self.pool.clone();
        let agent_id = agent_id.to_string();
        Box::pin(async move {
            let rows = sqlx::query(
                "SELECT blocked_date FROM blocked_dates WHERE agent_id = ? ORDER BY blocked_date",
            )
            .bind(&agent_id)
            .fetch_all(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

            let mut dates = Vec::with_capacity(rows.len());
            for row in &rows {
                let raw: String = row.try_get("blocked_date").map_err(DbError::from)?;
                dates.push(parse_date(&raw)?);
            }
            Ok(dates)
        })
    }

    fn list_active_visits(
        &self,
        agent_id: &str,
        visit_date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Visit>, StoreError> {
        self.list_visits(agent_id, visit_date, false)
    }

    fn list_visits(
        &self,
        agent_id: &str,
        visit_date: NaiveDate,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Visit>, StoreError> {
        let pool = self.pool.clone();
        let agent_id = agent_id.to_string();
        Box::pin(async move {
            let query = if include_cancelled {
                "SELECT * FROM visits
                 WHERE agent_id = ? AND visit_date = ?
                 ORDER BY start_time"
            } else {
                "SELECT * FROM visits
                 WHERE agent_id = ? AND visit_date = ? AND status IN ('pending', 'confirmed')
                 ORDER BY start_time"
            };

            let rows = sqlx::query(query)
                .bind(&agent_id)
                .bind(visit_date.format(DATE_FORMAT).to_string())
                .fetch_all(&pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            let mut visits = Vec::with_capacity(rows.len());
            for row in &rows {
                visits.push(row_to_visit(row)?);
            }
            Ok(visits)
        })
    }

    fn find_visit(&self, visit_id: &str) -> BoxFuture<'_, Option<Visit>, StoreError> {
        let pool = self.pool.clone();
        let visit_id = visit_id.to_string();
        Box::pin(async move {
            let row = sqlx::query("SELECT * FROM visits WHERE id = ?")
                .bind(&visit_id)
                .fetch_optional(&pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            row.as_ref().map(row_to_visit).transpose().map_err(Into::into)
        })
    }

    fn insert_visit(&self, visit: NewVisit) -> BoxFuture<'_, Visit, StoreError> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();
            let now = Utc::now();

            let result = sqlx::query(
                "INSERT INTO visits (
                    id, property_id, agent_id, visit_date, start_time, end_time,
                    visitor_name, visitor_phone, visitor_email, notes,
                    status, created_at, updated_at
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)",
            )
            .bind(&id)
            .bind(&visit.property_id)
            .bind(&visit.agent_id)
            .bind(visit.visit_date.format(DATE_FORMAT).to_string())
            .bind(visit.start_time.format(TIME_FORMAT).to_string())
            .bind(visit.end_time.format(TIME_FORMAT).to_string())
            .bind(&visit.visitor_name)
            .bind(&visit.visitor_phone)
            .bind(&visit.visitor_email)
            .bind(&visit.notes)
            .bind(now.to_rfc3339())
            .bind(now.to_rfc3339())
            .execute(&pool)
            .await;

            if let Err(err) = result {
                let mapped = map_insert_error(err);
                if matches!(mapped, StoreError::Conflict) {
                    warn!(
                        agent_id = %visit.agent_id,
                        visit_date = %visit.visit_date,
                        start_time = %visit.start_time,
                        "Insert rejected by active-slot unique index"
                    );
                }
                return Err(mapped);
            }

            Ok(Visit {
                id,
                property_id: visit.property_id,
                agent_id: visit.agent_id,
                visit_date: visit.visit_date,
                start_time: visit.start_time,
                end_time: visit.end_time,
                visitor_name: visit.visitor_name,
                visitor_phone: visit.visitor_phone,
                visitor_email: visit.visitor_email,
                notes: visit.notes,
                status: VisitStatus::Pending,
                cancelled_at: None,
                cancellation_reason: None,
                created_at: now,
                updated_at: now,
            })
        })
    }

    fn update_visit_status(
        &self,
        visit_id: &str,
        status: VisitStatus,
        cancelled_at: Option<DateTime<Utc>>,
        cancellation_reason: Option<String>,
    ) -> BoxFuture<'_, (), StoreError> {
        let pool = self.pool.clone();
        let visit_id = visit_id.to_string();
        Box::pin(async move {
            let result = sqlx::query(
                "UPDATE visits
                 SET status = ?, cancelled_at = ?, cancellation_reason = ?, updated_at = ?
                 WHERE id = ?",
            )
            .bind(status.as_str())
            .bind(cancelled_at.map(|ts| ts.to_rfc3339()))
            .bind(&cancellation_reason)
            .bind(Utc::now().to_rfc3339())
            .bind(&visit_id)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }
}
