mod fake_store;

use chrono::TimeDelta;
use fake_store::{FakeStore, at, identity, new_record, record};
use servicelog::core::record_store::{RecordStore, Snapshot, StoreState};
use servicelog::errors::AppError;
use servicelog::identity::IdentityProvider;
use servicelog::models::{RecordId, RecordPatch};
use servicelog::store::{DocumentStore, SqliteDocumentStore};
use std::sync::Arc;

fn store_with(fake: &Arc<FakeStore>) -> RecordStore {
    let documents: Arc<dyn DocumentStore> = fake.clone();
    RecordStore::new(documents)
}

#[test]
fn test_snapshot_sorted_by_start_descending() {
    let raw = vec![
        record("a", at(2025, 3, 1, 9, 0), 30),
        record("b", at(2025, 5, 1, 9, 0), 30),
        record("c", at(2025, 4, 1, 9, 0), 30),
    ];

    let snap = Snapshot::from_records(raw);
    let ids: Vec<&str> = snap.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b", "c", "a"]);
}

#[test]
fn test_snapshot_drops_duplicate_ids_keeping_first() {
    let mut dup = record("a", at(2025, 3, 1, 9, 0), 30);
    dup.title = "second copy".into();

    let snap = Snapshot::from_records(vec![
        record("a", at(2025, 3, 1, 9, 0), 30),
        record("b", at(2025, 3, 2, 9, 0), 30),
        dup,
    ]);

    assert_eq!(snap.len(), 2);
    assert_eq!(snap.get(&RecordId::new("a")).unwrap().title, "a");
}

#[test]
fn test_snapshot_equal_start_times_keep_arrival_order() {
    let t = at(2025, 3, 1, 9, 0);
    let snap = Snapshot::from_records(vec![record("x", t, 10), record("y", t, 20), record("z", t, 30)]);
    let ids: Vec<&str> = snap.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["x", "y", "z"]);
}

#[test]
fn test_unordered_delivery_is_normalized() {
    let fake = Arc::new(FakeStore::new());
    let alice = identity("alice");
    let mut store = store_with(&fake);
    store.subscribe(alice.clone()).unwrap();

    fake.push_raw(
        &alice,
        vec![
            record("old", at(2025, 1, 1, 9, 0), 30),
            record("new", at(2025, 6, 1, 9, 0), 30),
            record("old", at(2025, 1, 1, 9, 0), 30),
        ],
    );
    assert!(store.poll());

    let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["new", "old"]);
}

#[test]
fn test_create_appears_only_after_notification() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let mut store = RecordStore::new(documents);
    store.subscribe(identity("alice")).unwrap();
    assert!(store.records().is_empty());

    let input = new_record("Food Drive", at(2025, 6, 18, 9, 0), 90);
    let id = store.create(&input).unwrap();
    assert!(store.records().is_empty());

    assert!(store.poll());
    let saved = store.snapshot().get(&id).cloned().expect("record delivered");
    assert_eq!(saved.fields(), input);
    assert_eq!(*store.state(), StoreState::Live);
}

#[test]
fn test_update_and_delete_round_trip() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let mut store = RecordStore::new(documents);
    store.subscribe(identity("alice")).unwrap();

    let id = store
        .create(&new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap();
    store.poll();

    let patch = RecordPatch {
        title: Some("Food Drive (evening)".into()),
        notes: Some(Some("brought boxes".into())),
        ..RecordPatch::default()
    };
    store.update(&id, &patch).unwrap();
    store.poll();

    let updated = store.snapshot().get(&id).cloned().unwrap();
    assert_eq!(updated.title, "Food Drive (evening)");
    assert_eq!(updated.notes.as_deref(), Some("brought boxes"));
    assert_eq!(updated.duration_minutes, 90);
    assert!(updated.updated_at.is_some());

    store.delete(&id).unwrap();
    store.poll();
    assert!(store.records().is_empty());
}

#[test]
fn test_records_are_scoped_to_identity() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let mut alice = RecordStore::new(documents.clone());
    let mut bob = RecordStore::new(documents);
    alice.subscribe(identity("alice")).unwrap();
    bob.subscribe(identity("bob")).unwrap();

    alice
        .create(&new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap();
    alice.poll();
    bob.poll();

    assert_eq!(alice.records().len(), 1);
    assert!(bob.records().is_empty());
}

#[test]
fn test_create_while_signed_out_is_rejected() {
    let fake = Arc::new(FakeStore::new());
    let store = store_with(&fake);

    let err = store
        .create(&new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(fake.creates(), 0);
}

#[test]
fn test_create_with_blank_title_is_rejected() {
    let fake = Arc::new(FakeStore::new());
    let mut store = store_with(&fake);
    store.subscribe(identity("alice")).unwrap();

    let err = store
        .create(&new_record("   ", at(2025, 6, 18, 9, 0), 90))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(fake.creates(), 0);
}

#[test]
fn test_create_with_end_before_start_is_rejected() {
    let fake = Arc::new(FakeStore::new());
    let mut store = store_with(&fake);
    store.subscribe(identity("alice")).unwrap();

    let start = at(2025, 6, 18, 9, 0);
    let mut input = new_record("Food Drive", start, 30);
    input.end_time = Some(start - TimeDelta::minutes(5));

    assert!(matches!(
        store.create(&input).unwrap_err(),
        AppError::Validation(_)
    ));
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let mut store = RecordStore::new(documents);
    store.subscribe(identity("alice")).unwrap();

    let patch = RecordPatch {
        title: Some("x".into()),
        ..RecordPatch::default()
    };
    let err = store.update(&RecordId::new("missing"), &patch).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_delete_unknown_id_succeeds() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let mut store = RecordStore::new(documents);
    store.subscribe(identity("alice")).unwrap();

    store.delete(&RecordId::new("missing")).unwrap();
}

#[test]
fn test_write_failure_surfaces_persistence_error() {
    let fake = Arc::new(FakeStore::new());
    let mut store = store_with(&fake);
    store.subscribe(identity("alice")).unwrap();
    fake.fail_writes
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let err = store
        .create(&new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    store.poll();
    assert!(store.records().is_empty());
}

#[test]
fn test_failed_live_query_keeps_last_snapshot() {
    let fake = Arc::new(FakeStore::new());
    let alice = identity("alice");
    let mut store = store_with(&fake);
    store.subscribe(alice.clone()).unwrap();

    store
        .create(&new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap();
    store.poll();
    let before = store.snapshot();

    fake.fail_live_query(&alice, "permission denied");
    store.poll();

    assert!(store.is_degraded());
    assert_eq!(
        *store.state(),
        StoreState::Degraded {
            reason: "permission denied".into()
        }
    );
    assert_eq!(*store.snapshot(), *before);

    // a later delivery recovers
    fake.push_raw(&alice, vec![record("r1", at(2025, 6, 1, 9, 0), 15)]);
    store.poll();
    assert_eq!(*store.state(), StoreState::Live);
    assert_eq!(store.records().len(), 1);
}

#[test]
fn test_identity_change_resubscribes_once() {
    let fake = Arc::new(FakeStore::new());
    let mut store = store_with(&fake);

    assert!(store.set_identity(Some(identity("alice"))).unwrap());
    assert_eq!(fake.subscribes(), 1);

    // same identity again is a no-op
    assert!(!store.set_identity(Some(identity("alice"))).unwrap());
    assert_eq!(fake.subscribes(), 1);

    assert!(store.set_identity(Some(identity("bob"))).unwrap());
    assert_eq!(fake.subscribes(), 2);
    assert_eq!(fake.live_subscribers(), 1);
    assert_eq!(store.identity(), Some(&identity("bob")));
}

#[test]
fn test_identity_provider_drives_store() {
    let fake = Arc::new(FakeStore::new());
    let mut provider = IdentityProvider::default();
    let mut store = store_with(&fake);

    let change = provider.sign_in("alice").unwrap();
    assert_eq!(change.previous, None);
    store.set_identity(change.current).unwrap();
    assert_eq!(fake.subscribes(), 1);

    // same user (after trimming) is not a transition
    assert!(provider.sign_in(" alice ").is_none());

    let change = provider.sign_out().unwrap();
    assert_eq!(change.previous, Some(identity("alice")));
    store.set_identity(change.current).unwrap();
    assert_eq!(*store.state(), StoreState::SignedOut);
    assert!(provider.require().is_err());
    assert!(provider.sign_out().is_none());
}

#[test]
fn test_sign_out_clears_snapshot() {
    let fake = Arc::new(FakeStore::new());
    let alice = identity("alice");
    let mut store = store_with(&fake);
    store.set_identity(Some(alice.clone())).unwrap();
    fake.push_raw(&alice, vec![record("r1", at(2025, 6, 1, 9, 0), 15)]);
    store.poll();
    assert_eq!(store.records().len(), 1);

    assert!(store.set_identity(None).unwrap());
    assert!(store.records().is_empty());
    assert_eq!(*store.state(), StoreState::SignedOut);
    assert_eq!(fake.live_subscribers(), 0);
}

#[test]
fn test_unsubscribe_is_idempotent_and_stops_deliveries() {
    let fake = Arc::new(FakeStore::new());
    let alice = identity("alice");
    let mut store = store_with(&fake);
    store.subscribe(alice.clone()).unwrap();

    store.unsubscribe();
    store.unsubscribe();
    assert_eq!(fake.live_subscribers(), 0);

    fake.push_raw(&alice, vec![record("r1", at(2025, 6, 1, 9, 0), 15)]);
    assert!(!store.poll());
    assert!(store.records().is_empty());
}

#[test]
fn test_drop_releases_subscription() {
    let fake = Arc::new(FakeStore::new());
    {
        let mut store = store_with(&fake);
        store.subscribe(identity("alice")).unwrap();
        assert_eq!(fake.live_subscribers(), 1);
    }
    assert_eq!(fake.live_subscribers(), 0);
}

#[test]
fn test_sqlite_store_prunes_dropped_subscribers() {
    let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
    let alice = identity("alice");

    let sub = documents.subscribe(&alice).unwrap();
    assert_eq!(documents.subscriber_count(), 1);
    drop(sub);

    documents
        .create(&alice, &new_record("Food Drive", at(2025, 6, 18, 9, 0), 90))
        .unwrap();
    assert_eq!(documents.subscriber_count(), 0);
}

#[test]
fn test_concurrent_writers_deliver_latest_set_last() {
    use servicelog::store::{Delivery, StoreEvent};
    use std::thread;

    for _ in 0..50 {
        let documents = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        let alice = identity("alice");
        let sub = documents.subscribe(&alice).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let documents = documents.clone();
                let alice = alice.clone();
                thread::spawn(move || {
                    let title = format!("Shift {i}");
                    documents
                        .create(&alice, &new_record(&title, at(2025, 6, 18, 9 + i, 0), 30))
                        .unwrap();
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }

        let mut sizes = Vec::new();
        while let Delivery::Event(StoreEvent::Records(records)) = sub.try_next() {
            sizes.push(records.len());
        }

        // initial empty set, then one delivery per commit in commit order
        assert_eq!(sizes, [0, 1, 2, 3, 4]);
    }
}
