mod fake_store;

use chrono::TimeDelta;
use fake_store::{FakeStore, at, identity};
use servicelog::core::clock::{CLOCK_DESCRIPTION, CLOCK_NOTES, SessionClock};
use servicelog::core::record_store::RecordStore;
use servicelog::errors::AppError;
use servicelog::models::{Category, ClockState};
use servicelog::store::DocumentStore;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn signed_in(fake: &Arc<FakeStore>) -> RecordStore {
    let documents: Arc<dyn DocumentStore> = fake.clone();
    let mut store = RecordStore::new(documents);
    store.subscribe(identity("alice")).unwrap();
    store
}

#[test]
fn test_clock_out_records_elapsed_minutes() {
    let fake = Arc::new(FakeStore::new());
    let mut store = signed_in(&fake);
    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);

    clock
        .clock_in_at("Food Drive", "Local Pantry", Category::CommunityService, t0)
        .unwrap();
    assert!(clock.is_active());
    assert_eq!(
        clock.elapsed(t0 + TimeDelta::minutes(10)),
        Some(TimeDelta::minutes(10))
    );

    let done = clock
        .clock_out_at(&store, None, t0 + TimeDelta::minutes(47))
        .unwrap();

    assert_eq!(done.record.duration_minutes, 47);
    assert!(done.record.is_completed);
    assert_eq!(done.record.category, Category::CommunityService);
    assert_eq!(done.record.description, CLOCK_DESCRIPTION);
    assert_eq!(done.record.notes.as_deref(), Some(CLOCK_NOTES));
    assert_eq!(done.record.start_time, t0);
    assert_eq!(done.record.end_time, Some(t0 + TimeDelta::minutes(47)));
    assert_eq!(*clock.state(), ClockState::Idle);

    store.poll();
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].id, done.id);
}

#[test]
fn test_clock_out_rounds_to_nearest_minute() {
    let fake = Arc::new(FakeStore::new());
    let store = signed_in(&fake);
    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);

    clock
        .clock_in_at("Tutoring", "Library", Category::Education, t0)
        .unwrap();
    let done = clock
        .clock_out_at(&store, Some("  chapter 3  "), t0 + TimeDelta::seconds(90))
        .unwrap();

    assert_eq!(done.record.duration_minutes, 2);
    assert_eq!(done.record.notes.as_deref(), Some("chapter 3"));
}

#[test]
fn test_double_clock_in_keeps_first_session() {
    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);

    clock
        .clock_in_at("Food Drive", "Local Pantry", Category::CommunityService, t0)
        .unwrap();
    let err = clock
        .clock_in_at(
            "Other",
            "Elsewhere",
            Category::Other,
            t0 + TimeDelta::minutes(5),
        )
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidState(_)));
    let session = clock.state().current_session().unwrap();
    assert_eq!(session.start_time, t0);
    assert_eq!(session.title, "Food Drive");
}

#[test]
fn test_clock_out_while_idle_never_writes() {
    let fake = Arc::new(FakeStore::new());
    let store = signed_in(&fake);
    let mut clock = SessionClock::new();

    let err = clock
        .clock_out_at(&store, None, at(2025, 6, 18, 9, 0))
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(fake.creates(), 0);
}

#[test]
fn test_clock_in_requires_title_and_organization() {
    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);

    assert!(matches!(
        clock.clock_in_at(" ", "Local Pantry", Category::Other, t0),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        clock.clock_in_at("Food Drive", "", Category::Other, t0),
        Err(AppError::Validation(_))
    ));
    assert!(!clock.is_active());
}

#[test]
fn test_failed_write_drops_session() {
    let fake = Arc::new(FakeStore::new());
    let store = signed_in(&fake);
    fake.fail_writes.store(true, Ordering::SeqCst);

    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);
    clock
        .clock_in_at("Food Drive", "Local Pantry", Category::CommunityService, t0)
        .unwrap();

    let err = clock
        .clock_out_at(&store, None, t0 + TimeDelta::minutes(30))
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
    assert_eq!(fake.creates(), 1);
    assert!(!clock.is_active());
}

#[test]
fn test_clock_out_when_signed_out_resets_clock() {
    let fake = Arc::new(FakeStore::new());
    let documents: Arc<dyn DocumentStore> = fake.clone();
    let store = RecordStore::new(documents);

    let mut clock = SessionClock::new();
    let t0 = at(2025, 6, 18, 9, 0);
    clock
        .clock_in_at("Food Drive", "Local Pantry", Category::CommunityService, t0)
        .unwrap();

    assert!(matches!(
        clock.clock_out_at(&store, None, t0 + TimeDelta::minutes(30)),
        Err(AppError::Validation(_))
    ));
    assert_eq!(fake.creates(), 0);
    assert!(!clock.is_active());
}
