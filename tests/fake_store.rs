#![allow(dead_code)]
//! Scripted in-memory document store for failure injection.

use chrono::{DateTime, Local, TimeDelta, TimeZone};
use servicelog::errors::{AppError, AppResult};
use servicelog::models::{
    Category, Identity, NewServiceRecord, RecordId, RecordPatch, ServiceRecord,
};
use servicelog::store::{DocumentStore, StoreEvent, Subscription, SubscriptionId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<(Identity, ServiceRecord)>>,
    subscribers: Mutex<Vec<(SubscriptionId, Identity, Sender<StoreEvent>)>>,
    next: AtomicU64,
    pub subscribe_calls: AtomicUsize,
    pub unsubscribe_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribes(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn live_subscribers(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Deliver an arbitrary record set to every subscriber of `identity`.
    pub fn push_raw(&self, identity: &Identity, records: Vec<ServiceRecord>) {
        self.broadcast(identity, StoreEvent::Records(records));
    }

    /// Make the live query of `identity` fail.
    pub fn fail_live_query(&self, identity: &Identity, reason: &str) {
        self.broadcast(identity, StoreEvent::Failed(reason.to_string()));
    }

    fn broadcast(&self, identity: &Identity, event: StoreEvent) {
        let subs = self.subscribers.lock().unwrap();
        for (_, who, tx) in subs.iter() {
            if who == identity {
                let _ = tx.send(event.clone());
            }
        }
    }

    fn current(&self, identity: &Identity) -> Vec<ServiceRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(who, _)| who == identity)
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn notify(&self, identity: &Identity) {
        let records = self.current(identity);
        self.push_raw(identity, records);
    }

    fn check_writes(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::Persistence("network unreachable".into()))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for FakeStore {
    fn subscribe(&self, identity: &Identity) -> AppResult<Subscription> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel();
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        tx.send(StoreEvent::Records(self.current(identity))).unwrap();
        self.subscribers
            .lock()
            .unwrap()
            .push((id, identity.clone(), tx));
        Ok(Subscription::new(id, rx))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.subscribers.lock().unwrap().retain(|(sid, _, _)| *sid != id);
    }

    fn create(&self, identity: &Identity, record: &NewServiceRecord) -> AppResult<RecordId> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writes()?;
        let id = RecordId::new(format!("rec-{}", self.next.fetch_add(1, Ordering::SeqCst)));
        let stored = materialize(id.clone(), record);
        self.records.lock().unwrap().push((identity.clone(), stored));
        self.notify(identity);
        Ok(id)
    }

    fn update(&self, identity: &Identity, id: &RecordId, patch: &RecordPatch) -> AppResult<()> {
        self.check_writes()?;
        {
            let mut all = self.records.lock().unwrap();
            let (_, rec) = all
                .iter_mut()
                .find(|(who, r)| who == identity && &r.id == id)
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            let mut fields = rec.fields();
            patch.apply(&mut fields);
            *rec = materialize(id.clone(), &fields);
        }
        self.notify(identity);
        Ok(())
    }

    fn delete(&self, identity: &Identity, id: &RecordId) -> AppResult<()> {
        self.check_writes()?;
        self.records
            .lock()
            .unwrap()
            .retain(|(who, r)| !(who == identity && &r.id == id));
        self.notify(identity);
        Ok(())
    }
}

fn materialize(id: RecordId, r: &NewServiceRecord) -> ServiceRecord {
    ServiceRecord {
        id,
        title: r.title.clone(),
        organization: r.organization.clone(),
        description: r.description.clone(),
        start_time: r.start_time,
        end_time: r.end_time,
        duration_minutes: r.duration_minutes,
        category: r.category,
        is_completed: r.is_completed,
        notes: r.notes.clone(),
        supervisor: r.supervisor.clone(),
        location: r.location.clone(),
        created_at: "2025-01-01T00:00:00+00:00".into(),
        updated_at: None,
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn identity(name: &str) -> Identity {
    Identity::new(name).unwrap()
}

pub fn new_record(title: &str, start: DateTime<Local>, minutes: u32) -> NewServiceRecord {
    NewServiceRecord {
        title: title.to_string(),
        organization: "Local Pantry".into(),
        description: "Sorting donations".into(),
        start_time: start,
        end_time: Some(start + TimeDelta::minutes(i64::from(minutes))),
        duration_minutes: minutes,
        category: Category::CommunityService,
        is_completed: true,
        notes: None,
        supervisor: None,
        location: None,
    }
}

pub fn record(id: &str, start: DateTime<Local>, minutes: u32) -> ServiceRecord {
    materialize(RecordId::new(id), &new_record(id, start, minutes))
}
