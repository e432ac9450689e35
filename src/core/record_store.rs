//! Record store: the client-side, identity-scoped view of persisted records.
//!
//! Committed state is a pure reflection of the document store's live query:
//! `create`/`update`/`delete` only issue writes, and the snapshot changes when
//! the resulting notification is applied by `poll`/`wait`.

use crate::core::stats::compute_stats;
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, NewServiceRecord, RecordId, RecordPatch, ServiceRecord, ServiceStats};
use crate::store::{Delivery, DocumentStore, StoreEvent, Subscription};
use chrono::{DateTime, Local, Weekday};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Immutable, materialized view of one identity's records: no duplicate ids,
/// ordered by start time descending (ties keep arrival order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<ServiceRecord>,
}

impl Snapshot {
    pub fn from_records(raw: Vec<ServiceRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut records: Vec<ServiceRecord> = raw
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();

        // stable: equal start times keep arrival order
        records.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Self { records }
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&ServiceRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    SignedOut,
    Live,
    /// The live query failed; the snapshot is the last one known good.
    Degraded { reason: String },
}

pub struct RecordStore {
    documents: Arc<dyn DocumentStore>,
    identity: Option<Identity>,
    subscription: Option<Subscription>,
    snapshot: Arc<Snapshot>,
    state: StoreState,
    week_start: Weekday,
}

impl RecordStore {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents,
            identity: None,
            subscription: None,
            snapshot: Arc::new(Snapshot::default()),
            state: StoreState::SignedOut,
            week_start: Weekday::Sun,
        }
    }

    /// First day of the calendar week used by [`RecordStore::stats`].
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, StoreState::Degraded { .. })
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn records(&self) -> &[ServiceRecord] {
        self.snapshot.records()
    }

    /// Statistics over the current snapshot.
    pub fn stats(&self, now: DateTime<Local>) -> ServiceStats {
        compute_stats(self.snapshot.records(), now, self.week_start)
    }

    /// Start the live query for `identity`, replacing any previous one, and
    /// apply the initial delivery.
    pub fn subscribe(&mut self, identity: Identity) -> AppResult<()> {
        self.unsubscribe();

        let sub = self.documents.subscribe(&identity)?;
        self.identity = Some(identity);
        self.subscription = Some(sub);
        self.state = StoreState::Live;
        self.poll();
        Ok(())
    }

    /// Follow an identity transition. Returns `true` when the subscription
    /// was torn down and/or re-established, `false` when nothing changed.
    pub fn set_identity(&mut self, identity: Option<Identity>) -> AppResult<bool> {
        if identity == self.identity {
            return Ok(false);
        }
        match identity {
            Some(id) => self.subscribe(id)?,
            None => self.unsubscribe(),
        }
        Ok(true)
    }

    /// Stop deliveries and forget the snapshot. Calling it twice is harmless.
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.subscription.take() {
            self.documents.unsubscribe(sub.id());
        }
        self.identity = None;
        self.snapshot = Arc::new(Snapshot::default());
        self.state = StoreState::SignedOut;
    }

    /// Apply every pending notification without blocking.
    /// Returns `true` when a new snapshot was installed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            let delivery = match &self.subscription {
                Some(sub) => sub.try_next(),
                None => return changed,
            };
            match delivery {
                Delivery::Event(ev) => changed |= self.apply(ev),
                Delivery::Empty => return changed,
                Delivery::Closed => {
                    self.subscription = None;
                    self.degrade("live query closed by the document store".into());
                    return changed;
                }
            }
        }
    }

    /// Block up to `timeout` for the next notification, then drain the rest.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let delivery = match &self.subscription {
            Some(sub) => sub.next_timeout(timeout),
            None => return false,
        };
        let changed = match delivery {
            Delivery::Event(ev) => self.apply(ev),
            Delivery::Empty => false,
            Delivery::Closed => {
                self.subscription = None;
                self.degrade("live query closed by the document store".into());
                false
            }
        };
        self.poll() || changed
    }

    fn apply(&mut self, event: StoreEvent) -> bool {
        match event {
            StoreEvent::Records(records) => {
                self.snapshot = Arc::new(Snapshot::from_records(records));
                self.state = StoreState::Live;
                true
            }
            StoreEvent::Failed(reason) => {
                self.degrade(reason);
                false
            }
        }
    }

    fn degrade(&mut self, reason: String) {
        self.state = StoreState::Degraded { reason };
    }

    fn require_identity(&self) -> AppResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::Validation("no signed-in user".into()))
    }

    /// Persist a new record. The snapshot picks it up with the next notification.
    pub fn create(&self, record: &NewServiceRecord) -> AppResult<RecordId> {
        let identity = self.require_identity()?;
        record.validate()?;
        self.documents.create(identity, record)
    }

    /// Update a record by id. Existence is checked by the document store, not
    /// against the local snapshot.
    pub fn update(&self, id: &RecordId, patch: &RecordPatch) -> AppResult<()> {
        let identity = self.require_identity()?;
        patch.validate()?;
        self.documents.update(identity, id, patch)
    }

    pub fn delete(&self, id: &RecordId) -> AppResult<()> {
        let identity = self.require_identity()?;
        self.documents.delete(identity, id)
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        if let Some(sub) = self.subscription.take() {
            self.documents.unsubscribe(sub.id());
        }
    }
}
