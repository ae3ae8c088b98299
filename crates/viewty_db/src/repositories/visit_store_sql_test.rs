// --- File: crates/viewty_db/src/repositories/visit_store_sql_test.rs ---
//! Tests for the SQL visit store against an in-memory SQLite database.

use crate::{DbClient, DbError, SqlVisitStore};
use chrono::{NaiveDate, NaiveTime, Utc};
use viewty_common::models::{AvailabilityWindow, NewVisit, VisitStatus};
use viewty_common::{StoreError, VisitStore};

async fn memory_store() -> SqlVisitStore {
    let client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory database should open");
    let store = SqlVisitStore::new(&client);
    store.init_schema().await.expect("schema should initialize");
    store
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
}

fn new_visit(start: NaiveTime, end: NaiveTime) -> NewVisit {
    NewVisit {
        property_id: "prop-1".to_string(),
        agent_id: "agent-1".to_string(),
        visit_date: sample_date(),
        start_time: start,
        end_time: end,
        visitor_name: Some("Ada".to_string()),
        visitor_phone: None,
        visitor_email: Some("ada@example.com".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn insert_then_find_roundtrips_the_visit() {
    let store = memory_store().await;

    let stored = store
        .insert_visit(new_visit(time(9, 0), time(9, 30)))
        .await
        .expect("insert should succeed");
    assert_eq!(stored.status, VisitStatus::Pending);
    assert!(stored.cancelled_at.is_none());

    let found = store
        .find_visit(&stored.id)
        .await
        .expect("lookup should succeed")
        .expect("visit should exist");
    assert_eq!(found.id, stored.id);
    assert_eq!(found.visit_date, sample_date());
    assert_eq!(found.start_time, time(9, 0));
    assert_eq!(found.end_time, time(9, 30));
    assert_eq!(found.visitor_name.as_deref(), Some("Ada"));
    assert_eq!(found.status, VisitStatus::Pending);
}

#[tokio::test]
async fn find_visit_returns_none_for_unknown_id() {
    let store = memory_store().await;

    let found = store.find_visit("no-such-visit").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn unique_index_rejects_second_active_visit_for_same_slot() {
    let store = memory_store().await;

    store
        .insert_visit(new_visit(time(10, 0), time(10, 30)))
        .await
        .expect("first insert should succeed");

    let err = store
        .insert_visit(new_visit(time(10, 0), time(10, 30)))
        .await
        .expect_err("second insert for the same slot should fail");
    assert!(matches!(err, StoreError::Conflict));
}

#[tokio::test]
async fn cancelling_frees_the_slot_for_rebooking() {
    let store = memory_store().await;

    let first = store
        .insert_visit(new_visit(time(11, 0), time(11, 30)))
        .await
        .unwrap();

    store
        .update_visit_status(
            &first.id,
            VisitStatus::Cancelled,
            Some(Utc::now()),
            Some("visitor request".to_string()),
        )
        .await
        .expect("cancellation should succeed");

    // The partial index only covers active statuses, so the same slot is
    // insertable again.
    let rebooked = store
        .insert_visit(new_visit(time(11, 0), time(11, 30)))
        .await
        .expect("slot should be free after cancellation");
    assert_ne!(rebooked.id, first.id);

    let cancelled = store.find_visit(&first.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, VisitStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("visitor request"));
}

#[tokio::test]
async fn update_status_of_unknown_visit_is_not_found() {
    let store = memory_store().await;

    let err = store
        .update_visit_status("no-such-visit", VisitStatus::Confirmed, None, None)
        .await
        .expect_err("unknown id should fail");
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn active_listing_skips_cancelled_visits() {
    let store = memory_store().await;

    let kept = store
        .insert_visit(new_visit(time(9, 0), time(9, 30)))
        .await
        .unwrap();
    let dropped = store
        .insert_visit(new_visit(time(14, 0), time(14, 30)))
        .await
        .unwrap();
    store
        .update_visit_status(&dropped.id, VisitStatus::Cancelled, Some(Utc::now()), None)
        .await
        .unwrap();

    let active = store.list_active_visits("agent-1", sample_date()).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, kept.id);

    let all = store.list_visits("agent-1", sample_date(), true).await.unwrap();
    assert_eq!(all.len(), 2);
    // Ordered by start time regardless of insertion or cancellation order.
    assert_eq!(all[0].start_time, time(9, 0));
    assert_eq!(all[1].start_time, time(14, 0));
}

#[tokio::test]
async fn availability_windows_roundtrip_in_weekday_order() {
    let store = memory_store().await;

    store
        .add_availability_window(AvailabilityWindow {
            agent_id: "agent-1".to_string(),
            day_of_week: 3,
            start_time: time(13, 0),
            end_time: time(17, 0),
        })
        .await
        .unwrap();
    store
        .add_availability_window(AvailabilityWindow {
            agent_id: "agent-1".to_string(),
            day_of_week: 1,
            start_time: time(9, 0),
            end_time: time(12, 0),
        })
        .await
        .unwrap();

    let windows = store.list_availability("agent-1").await.unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].day_of_week, 1);
    assert_eq!(windows[1].day_of_week, 3);

    let removed = store
        .remove_availability_window("agent-1", 1, time(9, 0))
        .await
        .unwrap();
    assert!(removed);
    assert_eq!(store.list_availability("agent-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_availability_window_is_rejected() {
    let store = memory_store().await;

    let err = store
        .add_availability_window(AvailabilityWindow {
            agent_id: "agent-1".to_string(),
            day_of_week: 2,
            start_time: time(12, 0),
            end_time: time(9, 0),
        })
        .await
        .expect_err("inverted window should be rejected");
    assert!(matches!(err, DbError::Validation(_)));

    let err = store
        .add_availability_window(AvailabilityWindow {
            agent_id: "agent-1".to_string(),
            day_of_week: 7,
            start_time: time(9, 0),
            end_time: time(12, 0),
        })
        .await
        .expect_err("weekday 7 should be rejected");
    assert!(matches!(err, DbError::Validation(_)));
}

#[tokio::test]
async fn blocked_dates_roundtrip() {
    let store = memory_store().await;
    let date = sample_date();

    store.block_date("agent-1", date).await.unwrap();
    // Idempotent.
    store.block_date("agent-1", date).await.unwrap();

    let blocked = store.list_blocked_dates("agent-1").await.unwrap();
    assert_eq!(blocked, vec![date]);

    assert!(store.unblock_date("agent-1", date).await.unwrap());
    assert!(!store.unblock_date("agent-1", date).await.unwrap());
    assert!(store.list_blocked_dates("agent-1").await.unwrap().is_empty());
}
